//! Decoded route variables handed to handlers

use std::fmt;
use std::rc::Rc;

use crate::converter::Value;

/// Decoded variables of a matched rule, in rule order
///
/// # Examples
///
/// ```
/// use screen_router::{Params, Value};
///
/// let params = Params::new().with("id", 42).with("tab", "posts");
/// assert_eq!(params.get_int("id"), Some(42));
/// assert_eq!(params.get_str("tab"), Some("posts"));
/// assert_eq!(params.get("missing"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, Value)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name`, replacing an earlier value in place
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_int)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Value)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

/// Everything a handler receives for one dispatch
pub struct RouteArgs<V: ?Sized> {
    /// The route string being dispatched
    pub route: String,
    /// Screen identity the returned view will be shown under
    pub screen: String,
    /// Decoded variables
    pub params: Params,
    /// View currently linked to `screen`
    ///
    /// Only looked up for rules registered with `with_view`; always `None`
    /// otherwise, so handlers must cope with its absence.
    pub view: Option<Rc<V>>,
}

impl<V: ?Sized> RouteArgs<V> {
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.params.get_str(name)
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.params.get_int(name)
    }
}

impl<V: ?Sized> fmt::Debug for RouteArgs<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteArgs")
            .field("route", &self.route)
            .field("screen", &self.screen)
            .field("params", &self.params)
            .field("view", &self.view.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut params = Params::new().with("a", 1).with("b", 2);
        params.insert("a", 3);
        let collected: Vec<(&str, &Value)> = params.iter().collect();
        assert_eq!(collected, vec![("a", &Value::Int(3)), ("b", &Value::Int(2))]);
    }

    #[test]
    fn test_typed_getters() {
        let params = Params::new().with("n", 5).with("s", "x");
        assert_eq!(params.get_int("n"), Some(5));
        assert_eq!(params.get_str("n"), None);
        assert_eq!(params.get_str("s"), Some("x"));
        assert_eq!(params.len(), 2);
        assert!(!params.is_empty());
    }

    #[test]
    fn test_from_iterator() {
        let params: Params = vec![("id".to_string(), Value::Int(1))].into_iter().collect();
        assert!(params.contains("id"));
    }
}
