/// Error types for rule registration, value conversion and URL building
///
/// Registration errors surface immediately to whoever builds the router.
/// A route that matches nothing at dispatch time is not an error, see
/// [`Dispatch::NotFound`](crate::Dispatch::NotFound).

use thiserror::Error;

/// Failures raised while parsing or compiling a rule
#[derive(Debug, Error)]
pub enum RuleError {
    /// Stray `<` or `>` left over after the last variable token
    #[error("malformed url rule: {rule:?}")]
    Malformed { rule: String },

    /// The same variable name appears twice in one rule
    #[error("variable name {name:?} used twice in rule {rule:?}")]
    DuplicateVariable { rule: String, name: String },

    /// The rule references a converter the registry doesn't know
    #[error("unknown converter {name:?}")]
    UnknownConverter { name: String },

    /// A converter factory refused its construction args
    #[error("converter {name:?} rejected arguments {args:?}: {reason}")]
    InvalidConverterArgs {
        name: String,
        args: Option<String>,
        reason: String,
    },

    /// The assembled pattern failed to compile
    #[error("invalid pattern for rule {rule:?}: {source}")]
    Pattern {
        rule: String,
        #[source]
        source: regex::Error,
    },
}

/// A converter rejected raw route text or a typed value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{converter} converter cannot convert {input:?}: {reason}")]
pub struct ConversionError {
    pub converter: String,
    pub input: String,
    pub reason: String,
}

impl ConversionError {
    pub fn new(
        converter: impl Into<String>,
        input: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            converter: converter.into(),
            input: input.into(),
            reason: reason.into(),
        }
    }
}

/// Failures while building a route string from parameters
#[derive(Debug, Error)]
pub enum UrlBuildError {
    #[error("no route registered under {name:?}")]
    UnknownRoute { name: String },

    #[error("missing value for variable {variable:?} of rule {rule:?}")]
    MissingParameter { rule: String, variable: String },

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_error_messages() {
        let err = RuleError::Malformed {
            rule: "/a/<b".to_string(),
        };
        assert_eq!(err.to_string(), "malformed url rule: \"/a/<b\"");

        let err = RuleError::DuplicateVariable {
            rule: "/<x>/<x>".to_string(),
            name: "x".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "variable name \"x\" used twice in rule \"/<x>/<x>\""
        );
    }

    #[test]
    fn test_conversion_error_message() {
        let err = ConversionError::new("int", "abc", "not a number");
        assert_eq!(
            err.to_string(),
            "int converter cannot convert \"abc\": not a number"
        );
    }
}
