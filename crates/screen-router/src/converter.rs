/// Converters turn captured route text into typed values and back
///
/// Each variable in a rule names a converter. The converter supplies the
/// regex fragment spliced into the compiled pattern, decodes the captured
/// text once a route matches, and encodes typed values when building routes.
///
/// Converters are looked up in a [`ConverterRegistry`] owned by the router,
/// pre-populated with `default`, `int` and `path`.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{ConversionError, RuleError};

/// A typed value produced by a converter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Str(String),
    Int(i64),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            Value::Int(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Str(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Int(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(i64::from(value))
    }
}

/// Typed decode/encode capability bound to a rule variable
///
/// Instances are stateless apart from their construction args and may be
/// shared across any number of matches.
pub trait Converter: fmt::Debug + Send + Sync {
    /// Regex fragment describing acceptable raw text (no anchors, no named groups)
    fn regex(&self) -> &str;

    /// Raw captured text → typed value
    fn to_value(&self, raw: &str) -> Result<Value, ConversionError>;

    /// Typed value → raw route text
    fn to_url(&self, value: &Value) -> Result<String, ConversionError>;
}

/// One or more non-slash characters, decoded verbatim
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeConverter;

impl Converter for UnicodeConverter {
    fn regex(&self) -> &str {
        "[^/]+"
    }

    fn to_value(&self, raw: &str) -> Result<Value, ConversionError> {
        Ok(Value::Str(raw.to_string()))
    }

    fn to_url(&self, value: &Value) -> Result<String, ConversionError> {
        let encoded = value.to_string();
        if encoded.is_empty() || encoded.contains('/') {
            return Err(ConversionError::new(
                "default",
                encoded,
                "expected one or more non-slash characters",
            ));
        }
        Ok(encoded)
    }
}

/// ASCII digits, decoded to an `i64`
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerConverter;

impl Converter for IntegerConverter {
    fn regex(&self) -> &str {
        "[0-9]+"
    }

    fn to_value(&self, raw: &str) -> Result<Value, ConversionError> {
        raw.parse::<i64>()
            .map(Value::Int)
            .map_err(|e| ConversionError::new("int", raw, e.to_string()))
    }

    fn to_url(&self, value: &Value) -> Result<String, ConversionError> {
        match value {
            Value::Int(n) if *n >= 0 => Ok(n.to_string()),
            Value::Int(n) => Err(ConversionError::new(
                "int",
                n.to_string(),
                "negative integers have no route form",
            )),
            Value::Str(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
                Ok(s.clone())
            }
            Value::Str(s) => Err(ConversionError::new("int", s.as_str(), "not an integer")),
        }
    }
}

/// Any characters including slashes, decoded with a leading slash
///
/// `"audio"` and `"/audio"` both decode to `"/audio"`, which makes the
/// decoded value directly usable as a nested router's route.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathConverter;

impl Converter for PathConverter {
    fn regex(&self) -> &str {
        ".+"
    }

    fn to_value(&self, raw: &str) -> Result<Value, ConversionError> {
        if raw.starts_with('/') {
            Ok(Value::Str(raw.to_string()))
        } else {
            Ok(Value::Str(format!("/{}", raw)))
        }
    }

    fn to_url(&self, value: &Value) -> Result<String, ConversionError> {
        let encoded = value.to_string();
        // Rules put their own slash before the variable
        let trimmed = encoded.trim_start_matches('/');
        if trimmed.is_empty() {
            return Err(ConversionError::new("path", encoded, "empty path"));
        }
        Ok(trimmed.to_string())
    }
}

/// Builds a converter from the optional args string of a rule variable
pub type ConverterFactory =
    Arc<dyn Fn(Option<&str>) -> Result<Arc<dyn Converter>, RuleError> + Send + Sync>;

/// Wraps a closure as a [`ConverterFactory`]
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use screen_router::{factory, Converter, ConverterRegistry, IntegerConverter};
///
/// let mut registry = ConverterRegistry::new();
/// registry.register("id", factory(|_args| Ok(Arc::new(IntegerConverter) as Arc<dyn Converter>)));
/// assert!(registry.contains("id"));
/// ```
pub fn factory<F>(f: F) -> ConverterFactory
where
    F: Fn(Option<&str>) -> Result<Arc<dyn Converter>, RuleError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Named converter factories available to the pattern compiler
#[derive(Clone)]
pub struct ConverterRegistry {
    factories: HashMap<String, ConverterFactory>,
}

impl ConverterRegistry {
    /// Registry with only the built-in converters
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_converter("default", UnicodeConverter);
        registry.register_converter("int", IntegerConverter);
        registry.register_converter("path", PathConverter);
        registry
    }

    /// Registry with no converters at all
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registers a factory under `name`, replacing any previous one
    pub fn register(&mut self, name: impl Into<String>, factory: ConverterFactory) {
        self.factories.insert(name.into(), factory);
    }

    /// Registers an args-less converter instance under `name`
    pub fn register_converter<C>(&mut self, name: impl Into<String>, converter: C)
    where
        C: Converter + Clone + 'static,
    {
        self.register(
            name,
            factory(move |_args| Ok(Arc::new(converter.clone()) as Arc<dyn Converter>)),
        );
    }

    /// Builder form of [`register`](Self::register)
    pub fn with(mut self, name: impl Into<String>, factory: ConverterFactory) -> Self {
        self.register(name, factory);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Builds the converter `name` with the rule's args
    pub fn resolve(&self, name: &str, args: Option<&str>) -> Result<Arc<dyn Converter>, RuleError> {
        let build = self
            .factories
            .get(name)
            .ok_or_else(|| RuleError::UnknownConverter {
                name: name.to_string(),
            })?;
        build(args)
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.factories.keys().collect();
        names.sort();
        f.debug_struct("ConverterRegistry")
            .field("converters", &names)
            .finish()
    }
}
