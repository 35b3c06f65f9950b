/// Route table: ordered rule → handler bindings
///
/// Registration order is the only tie-break. The first entry whose pattern
/// matches a route wins, so specific rules must be registered before the
/// general ones that would also match.

use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::params::{Params, RouteArgs};
use crate::rule::CompiledRule;

/// A route handler: receives decoded arguments, returns the view to show
pub type Handler<V> = Rc<dyn Fn(RouteArgs<V>) -> anyhow::Result<Rc<V>>>;

/// Wraps a closure as a [`Handler`]
pub fn handler<V, F>(f: F) -> Handler<V>
where
    V: ?Sized,
    F: Fn(RouteArgs<V>) -> anyhow::Result<Rc<V>> + 'static,
{
    Rc::new(f)
}

/// Options shared by every rule a handler is registered under
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteOptions {
    /// Screen identity; defaults to the matched route string
    pub name: Option<String>,
    /// Pass the view currently linked to the screen into the handler
    pub with_view: bool,
}

impl RouteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_view(mut self) -> Self {
        self.with_view = true;
        self
    }

    /// Screen identity for a dispatch of `route`
    pub fn screen_name<'a>(&'a self, route: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(route)
    }
}

/// One registered rule
pub struct RouteEntry<V: ?Sized> {
    pub rule: CompiledRule,
    pub handler: Handler<V>,
    pub options: RouteOptions,
}

impl<V: ?Sized> Clone for RouteEntry<V> {
    fn clone(&self) -> Self {
        Self {
            rule: self.rule.clone(),
            handler: Rc::clone(&self.handler),
            options: self.options.clone(),
        }
    }
}

impl<V: ?Sized> fmt::Debug for RouteEntry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("rule", &self.rule)
            .field("options", &self.options)
            .finish()
    }
}

/// A route string resolved against the table
pub struct RouteMatch<'a, V: ?Sized> {
    pub entry: &'a RouteEntry<V>,
    pub params: Params,
}

/// Insertion-ordered route entries of one router
pub struct RouteTable<V: ?Sized> {
    entries: Vec<RouteEntry<V>>,
}

impl<V: ?Sized> RouteTable<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an entry; textually identical rules stay distinct entries
    pub fn push(&mut self, rule: CompiledRule, handler: Handler<V>, options: RouteOptions) {
        debug!(rule = rule.rule(), pattern = rule.as_regex().as_str(), "add route");
        self.entries.push(RouteEntry {
            rule,
            handler,
            options,
        });
    }

    /// First entry matching `route` whose captures all decode
    ///
    /// An entry whose pattern matches but whose converter rejects a capture
    /// is skipped and evaluation continues with the next one.
    pub fn find(&self, route: &str) -> Option<RouteMatch<'_, V>> {
        self.entries.iter().find_map(|entry| match entry.rule.captures(route)? {
            Ok(params) => Some(RouteMatch { entry, params }),
            Err(err) => {
                debug!(rule = entry.rule.rule(), route, error = %err, "capture rejected");
                None
            }
        })
    }

    /// Entries whose screen name (rule text when unnamed) equals `name`
    pub fn named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a RouteEntry<V>> + 'a {
        self.entries.iter().filter(move |entry| {
            entry.options.name.as_deref().unwrap_or(entry.rule.rule()) == name
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteEntry<V>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: ?Sized> Default for RouteTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: ?Sized> Clone for RouteTable<V> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

/// Declares one handler under one or more rules with shared options
///
/// Stacking several rules on one spec is how a single handler serves, for
/// example, both `/settings` and `/settings/<path:subroute>`.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
/// use screen_router::RouteSpec;
///
/// let spec: RouteSpec<String> = RouteSpec::new(|args| Ok(Rc::new(args.route)))
///     .rule("/settings")
///     .rule("/settings/<path:subroute>")
///     .named("settings")
///     .with_view();
///
/// assert_eq!(spec.rules(), ["/settings", "/settings/<path:subroute>"]);
/// ```
pub struct RouteSpec<V: ?Sized> {
    rules: Vec<String>,
    handler: Handler<V>,
    options: RouteOptions,
}

impl<V: ?Sized> RouteSpec<V> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(RouteArgs<V>) -> anyhow::Result<Rc<V>> + 'static,
    {
        Self::from_handler(handler(f))
    }

    pub fn from_handler(handler: Handler<V>) -> Self {
        Self {
            rules: Vec::new(),
            handler,
            options: RouteOptions::default(),
        }
    }

    pub fn rule(mut self, rule: impl Into<String>) -> Self {
        self.rules.push(rule.into());
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.options.name = Some(name.into());
        self
    }

    pub fn with_view(mut self) -> Self {
        self.options.with_view = true;
        self
    }

    pub fn options(mut self, options: RouteOptions) -> Self {
        self.options = options;
        self
    }

    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, Handler<V>, RouteOptions) {
        (self.rules, self.handler, self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::ConverterRegistry;

    fn entry_table(rules: &[&str]) -> RouteTable<String> {
        let registry = ConverterRegistry::new();
        let mut table = RouteTable::new();
        for rule in rules {
            let text = rule.to_string();
            table.push(
                CompiledRule::compile(rule, &registry).unwrap(),
                handler(move |_args| Ok(Rc::new(text.clone()))),
                RouteOptions::default(),
            );
        }
        table
    }

    #[test]
    fn test_first_registered_wins() {
        let table = entry_table(&["/<path:any>", "/about"]);
        let m = table.find("/about").unwrap();
        assert_eq!(m.entry.rule.rule(), "/<path:any>");
    }

    #[test]
    fn test_identical_rules_stay_distinct() {
        let table = entry_table(&["/a", "/a"]);
        assert_eq!(table.len(), 2);
        let m = table.find("/a").unwrap();
        assert!(std::ptr::eq(m.entry, table.iter().next().unwrap()));
    }

    #[test]
    fn test_rejected_capture_falls_through() {
        let table = entry_table(&["/<int:n>", "/<name>"]);
        let m = table.find("/99999999999999999999").unwrap();
        assert_eq!(m.entry.rule.rule(), "/<name>");
    }

    #[test]
    fn test_no_match() {
        let table = entry_table(&["/a"]);
        assert!(table.find("/b").is_none());
        assert!(RouteTable::<String>::new().find("/").is_none());
    }

    #[test]
    fn test_named_lookup_uses_rule_text_when_unnamed() {
        let table = entry_table(&["/a", "/b"]);
        assert_eq!(table.named("/b").count(), 1);
        assert_eq!(table.named("b").count(), 0);
    }

    #[test]
    fn test_screen_name_defaults_to_route() {
        assert_eq!(RouteOptions::new().screen_name("/x"), "/x");
        assert_eq!(RouteOptions::new().named("s").screen_name("/x"), "s");
    }
}
