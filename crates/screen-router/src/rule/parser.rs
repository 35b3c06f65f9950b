/// Rule grammar parsing
///
/// Turns a rule such as `/settings/<path:subroute>` into an ordered list of
/// literal and variable segments. Pure: same input → same output.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::RuleError;

/// Converter used when a variable doesn't name one (`<name>`)
pub const DEFAULT_CONVERTER: &str = "default";

/// Static text up to the next `<`, then one variable token
static RULE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        \A
        (?P<static>[^<]*)                           # static rule data
        <
        (?:
            (?P<converter>[a-zA-Z_][a-zA-Z0-9_]*)   # converter name
            (?:\((?P<args>.*?)\))?                  # converter arguments
            :                                       # variable delimiter
        )?
        (?P<variable>[a-zA-Z_][a-zA-Z0-9_]*)        # variable name
        >
        ",
    )
    .expect("rule grammar regex is valid")
});

/// One piece of a parsed rule
///
/// # Examples
///
/// ```
/// use screen_router::{parse_rule, Segment};
///
/// let segments = parse_rule("/users/<int:id>").unwrap();
/// assert_eq!(segments[0], Segment::literal("/users/"));
/// assert_eq!(segments[1], Segment::variable("int", None, "id"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text that must appear verbatim
    Literal(String),
    /// A named capture decoded by `converter`
    Variable {
        converter: String,
        args: Option<String>,
        name: String,
    },
}

impl Segment {
    pub fn literal(text: impl Into<String>) -> Self {
        Segment::Literal(text.into())
    }

    pub fn variable(
        converter: impl Into<String>,
        args: Option<&str>,
        name: impl Into<String>,
    ) -> Self {
        Segment::Variable {
            converter: converter.into(),
            args: args.map(str::to_string),
            name: name.into(),
        }
    }

    /// Variable name, `None` for literals
    pub fn variable_name(&self) -> Option<&str> {
        match self {
            Segment::Variable { name, .. } => Some(name),
            Segment::Literal(_) => None,
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Segment::Variable { .. })
    }
}

/// Parses a rule into segments
///
/// Literal text is emitted only when non-empty. Variables are written
/// `<converter(args):name>`, `<converter:name>` or `<name>`; args are kept
/// verbatim for the converter factory. Whatever follows the last variable
/// becomes a trailing literal and must not contain `<` or `>`.
///
/// # Errors
///
/// - [`RuleError::Malformed`] for stray angle brackets in the trailing text
/// - [`RuleError::DuplicateVariable`] when a variable name repeats
///
/// # Examples
///
/// ```
/// use screen_router::{parse_rule, Segment};
///
/// let segments = parse_rule("/settings/<path:subroute>").unwrap();
/// assert_eq!(
///     segments,
///     vec![
///         Segment::literal("/settings/"),
///         Segment::variable("path", None, "subroute"),
///     ]
/// );
///
/// assert!(parse_rule("/broken/<id").is_err());
/// assert!(parse_rule("/<a>/<a>").is_err());
/// ```
pub fn parse_rule(rule: &str) -> Result<Vec<Segment>, RuleError> {
    let mut segments = Vec::new();
    let mut used_names: HashSet<&str> = HashSet::new();
    let mut pos = 0;

    while pos < rule.len() {
        let Some(caps) = RULE_RE.captures(&rule[pos..]) else {
            break;
        };

        let static_part = caps.name("static").map_or("", |m| m.as_str());
        if !static_part.is_empty() {
            segments.push(Segment::literal(static_part));
        }

        let name = caps.name("variable").map_or("", |m| m.as_str());
        let converter = caps
            .name("converter")
            .map_or(DEFAULT_CONVERTER, |m| m.as_str());
        // `<int():x>` carries no args, same as `<int:x>`
        let args = caps
            .name("args")
            .map(|m| m.as_str())
            .filter(|a| !a.is_empty());

        if !used_names.insert(name) {
            return Err(RuleError::DuplicateVariable {
                rule: rule.to_string(),
                name: name.to_string(),
            });
        }

        segments.push(Segment::variable(converter, args, name));
        pos += caps.get(0).map_or(0, |m| m.end());
    }

    if pos < rule.len() {
        let remaining = &rule[pos..];
        if remaining.contains('<') || remaining.contains('>') {
            return Err(RuleError::Malformed {
                rule: rule.to_string(),
            });
        }
        segments.push(Segment::literal(remaining));
    }

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_static_rule() {
        assert_eq!(parse_rule("/about").unwrap(), vec![Segment::literal("/about")]);
    }

    #[test]
    fn test_parse_empty_rule() {
        assert!(parse_rule("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_shorthand_variable() {
        assert_eq!(
            parse_rule("/users/<name>").unwrap(),
            vec![
                Segment::literal("/users/"),
                Segment::variable("default", None, "name"),
            ]
        );
    }

    #[test]
    fn test_parse_converter_with_args() {
        assert_eq!(
            parse_rule("/lang/<any(en,fr):code>/page").unwrap(),
            vec![
                Segment::literal("/lang/"),
                Segment::variable("any", Some("en,fr"), "code"),
                Segment::literal("/page"),
            ]
        );
    }

    #[test]
    fn test_parse_adjacent_variables() {
        assert_eq!(
            parse_rule("<a><int:b>").unwrap(),
            vec![
                Segment::variable("default", None, "a"),
                Segment::variable("int", None, "b"),
            ]
        );
    }

    #[test]
    fn test_parse_empty_args_are_absent() {
        assert_eq!(
            parse_rule("/<int():x>").unwrap()[1],
            Segment::variable("int", None, "x")
        );
    }

    #[test]
    fn test_parse_malformed_trailing_text() {
        assert!(matches!(
            parse_rule("/users/<id"),
            Err(RuleError::Malformed { .. })
        ));
        assert!(matches!(
            parse_rule("/users/<id>/x>"),
            Err(RuleError::Malformed { .. })
        ));
        assert!(matches!(parse_rule("/<>"), Err(RuleError::Malformed { .. })));
        assert!(matches!(
            parse_rule("/<1abc>"),
            Err(RuleError::Malformed { .. })
        ));
    }

    #[test]
    fn test_parse_duplicate_variable() {
        let err = parse_rule("/<int:id>/<id>").unwrap_err();
        assert!(matches!(err, RuleError::DuplicateVariable { ref name, .. } if name == "id"));
    }

    #[test]
    fn test_variable_name_accessor() {
        let segments = parse_rule("/x/<int:id>").unwrap();
        assert_eq!(segments[0].variable_name(), None);
        assert_eq!(segments[1].variable_name(), Some("id"));
        assert!(segments[1].is_variable());
    }
}
