/// Rule compilation into anchored matchers
///
/// Literal segments are escaped verbatim, each variable becomes a named
/// capture using its converter's regex fragment, and the whole pattern is
/// anchored so only complete route strings match.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use super::parser::{parse_rule, Segment};
use crate::converter::{Converter, ConverterRegistry};
use crate::error::{ConversionError, RuleError, UrlBuildError};
use crate::params::Params;

/// A variable segment with its converter already resolved
#[derive(Clone)]
struct BoundVariable {
    name: String,
    converter: Arc<dyn Converter>,
}

/// Parsed segments plus the matcher compiled from them
///
/// Compiling once and registering the result under several handlers avoids
/// re-parsing the same rule text.
///
/// # Examples
///
/// ```
/// use screen_router::{CompiledRule, ConverterRegistry, Value};
///
/// let registry = ConverterRegistry::new();
/// let rule = CompiledRule::compile("/users/<int:id>", &registry).unwrap();
///
/// assert_eq!(rule.as_regex().as_str(), r"^/users/(?P<id>[0-9]+)$");
///
/// let params = rule.captures("/users/42").unwrap().unwrap();
/// assert_eq!(params.get("id"), Some(&Value::Int(42)));
/// assert!(rule.captures("/users/42/edit").is_none());
/// ```
#[derive(Clone)]
pub struct CompiledRule {
    rule: String,
    segments: Vec<Segment>,
    regex: Regex,
    variables: Vec<BoundVariable>,
}

impl CompiledRule {
    /// Parses and compiles `rule` against `registry`
    ///
    /// # Errors
    ///
    /// Any parse error, [`RuleError::UnknownConverter`] for an unregistered
    /// converter name, or whatever the converter factory rejects.
    pub fn compile(rule: &str, registry: &ConverterRegistry) -> Result<Self, RuleError> {
        let segments = parse_rule(rule)?;
        Self::from_segments(rule, segments, registry)
    }

    /// Compiles already-parsed segments
    ///
    /// Variable names are expected to be unique, which [`parse_rule`] guarantees.
    pub fn from_segments(
        rule: &str,
        segments: Vec<Segment>,
        registry: &ConverterRegistry,
    ) -> Result<Self, RuleError> {
        let mut pattern = String::from("^");
        let mut variables = Vec::new();

        for segment in &segments {
            match segment {
                Segment::Literal(text) => pattern.push_str(&regex::escape(text)),
                Segment::Variable {
                    converter,
                    args,
                    name,
                } => {
                    let converter = registry.resolve(converter, args.as_deref())?;
                    pattern.push_str(&format!("(?P<{}>{})", name, converter.regex()));
                    variables.push(BoundVariable {
                        name: name.clone(),
                        converter,
                    });
                }
            }
        }
        pattern.push('$');

        let regex = Regex::new(&pattern).map_err(|source| RuleError::Pattern {
            rule: rule.to_string(),
            source,
        })?;

        Ok(Self {
            rule: rule.to_string(),
            segments,
            regex,
            variables,
        })
    }

    /// Rule text as registered
    pub fn rule(&self) -> &str {
        &self.rule
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn as_regex(&self) -> &Regex {
        &self.regex
    }

    /// Variable names in rule order
    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.variables.iter().map(|v| v.name.as_str())
    }

    /// Whether `route` matches in its entirety
    pub fn is_match(&self, route: &str) -> bool {
        self.regex.is_match(route)
    }

    /// Matches `route` and decodes every capture
    ///
    /// Returns `None` when the pattern doesn't match, `Some(Err(_))` when it
    /// matches but a converter rejects the captured text.
    pub fn captures(&self, route: &str) -> Option<Result<Params, ConversionError>> {
        let caps = self.regex.captures(route)?;

        let decoded = self
            .variables
            .iter()
            .map(|variable| {
                let raw = caps.name(&variable.name).map_or("", |m| m.as_str());
                variable
                    .converter
                    .to_value(raw)
                    .map(|value| (variable.name.clone(), value))
            })
            .collect::<Result<Params, _>>();

        Some(decoded)
    }

    /// Builds a route string by encoding `params` through each converter
    ///
    /// # Examples
    ///
    /// ```
    /// use screen_router::{CompiledRule, ConverterRegistry, Params};
    ///
    /// let rule = CompiledRule::compile("/users/<int:id>/<tab>", &ConverterRegistry::new()).unwrap();
    /// let params = Params::new().with("id", 7).with("tab", "posts");
    /// assert_eq!(rule.build(&params).unwrap(), "/users/7/posts");
    /// ```
    pub fn build(&self, params: &Params) -> Result<String, UrlBuildError> {
        let mut url = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => url.push_str(text),
                Segment::Variable { name, .. } => {
                    let missing = || UrlBuildError::MissingParameter {
                        rule: self.rule.clone(),
                        variable: name.clone(),
                    };
                    let value = params.get(name).ok_or_else(missing)?;
                    let bound = self
                        .variables
                        .iter()
                        .find(|v| v.name == *name)
                        .ok_or_else(missing)?;
                    url.push_str(&bound.converter.to_url(value)?);
                }
            }
        }

        Ok(url)
    }

    /// Whether `params` supplies every variable of this rule
    pub fn accepts(&self, params: &Params) -> bool {
        self.variables.iter().all(|v| params.contains(&v.name))
    }
}

impl fmt::Debug for CompiledRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledRule")
            .field("rule", &self.rule)
            .field("pattern", &self.regex.as_str())
            .finish()
    }
}
