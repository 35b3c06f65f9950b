//! # Screen Router
//!
//! Declarative URL-pattern routing for screen-stack user interfaces:
//! - Rules with typed variables (`/users/<int:id>`, `/settings/<path:subroute>`)
//! - Pluggable converters (`default`, `int`, `path`, or your own)
//! - First-match-wins dispatch in registration order
//! - View ↔ screen linkage so navigating back to a screen reuses it
//! - Bounded, adjacency-deduplicated history with `history_back`
//!
//! ## Matching Rules
//!
//! Rules compile to anchored regular expressions at registration time, so
//! dispatch only evaluates patterns. Registration order is the only
//! tie-break: register specific rules before the catch-alls that would also
//! match them.
//!
//! ## Screens
//!
//! A handler returns a view. The router places it in a screen named after
//! the route (or the rule's `name` option) and tells the host
//! [`ScreenStack`] which screen to show. A view already hosted by a screen
//! keeps that screen; a handler registered `with_view` receives the view
//! its screen currently hosts and may return it unchanged.
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use screen_router::{Dispatch, MemoryStack, Router, RouteSpec};
//!
//! let mut router: Router<String, MemoryStack> = Router::new(MemoryStack::new())
//!     .with_routes(vec![
//!         RouteSpec::new(|_| Ok(Rc::new("menu".to_string()))).rule("/"),
//!         RouteSpec::new(|args| {
//!             Ok(Rc::new(format!("user {}", args.get_int("id").unwrap_or_default())))
//!         })
//!         .rule("/users/<int:id>"),
//!     ])
//!     .unwrap();
//!
//! router.set_route("/users/7").unwrap();
//! assert_eq!(router.current_screen().unwrap().name(), "/users/7");
//! assert_eq!(router.view_for("/users/7").unwrap().as_str(), "user 7");
//!
//! // Unknown routes are reported, not raised
//! assert_eq!(router.set_route("/nope").unwrap(), Dispatch::NotFound);
//! assert_eq!(router.stack().displayed(), Some("/users/7"));
//! ```

use std::rc::Rc;

use tracing::{info, warn};

// ============================================================================
// Module Declarations
// ============================================================================

pub mod config;
pub mod converter;
pub mod error;
pub mod history;
pub mod navigator;
pub mod params;
pub mod rule;
pub mod screen;
pub mod table;

// Re-export public types
pub use config::Config;
pub use converter::{
    factory, Converter, ConverterFactory, ConverterRegistry, IntegerConverter, PathConverter,
    UnicodeConverter, Value,
};
pub use error::{ConversionError, RuleError, UrlBuildError};
pub use history::{History, DEFAULT_MAX_HISTORY};
pub use navigator::Navigator;
pub use params::{Params, RouteArgs};
pub use rule::{parse_rule, CompiledRule, Segment};
pub use screen::{MemoryStack, Screen, ScreenArena, ScreenChange, ScreenStack, StackEvent};
pub use table::{handler, Handler, RouteEntry, RouteOptions, RouteSpec, RouteTable};

// ============================================================================
// Dispatch Outcome
// ============================================================================

/// Result of a route change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// A handler ran and its view is displayed under `screen`
    Resolved { screen: String, change: ScreenChange },
    /// No rule matched; nothing was invoked and the display is untouched
    NotFound,
    /// The route equals the current one; nothing was dispatched
    Unchanged,
}

impl Dispatch {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Dispatch::Resolved { .. })
    }

    /// Screen identity of a resolved dispatch
    pub fn screen(&self) -> Option<&str> {
        match self {
            Dispatch::Resolved { screen, .. } => Some(screen),
            _ => None,
        }
    }
}

// ============================================================================
// Router Implementation
// ============================================================================

/// Route table, screens and current route of one routing level
///
/// `V` is the view type handlers return; `S` is the host screen stack.
/// Views that own a `Router` of their own make nested routing: the parent
/// captures the remainder of the route with a `path` variable and hands it
/// to the child's [`set_route`](Router::set_route).
pub struct Router<V: ?Sized, S> {
    table: RouteTable<V>,
    registry: ConverterRegistry,
    screens: ScreenArena<V>,
    stack: S,
    route: String,
}

impl<V: ?Sized, S: ScreenStack<V>> Router<V, S> {
    /// Creates a router with the built-in converters
    pub fn new(stack: S) -> Self {
        Self::with_registry(stack, ConverterRegistry::new())
    }

    /// Creates a router compiling rules against `registry`
    pub fn with_registry(stack: S, registry: ConverterRegistry) -> Self {
        Self {
            table: RouteTable::new(),
            registry,
            screens: ScreenArena::new(),
            stack,
            route: String::new(),
        }
    }

    /// Registers every spec in order (functional builder)
    ///
    /// Fails on the first rule that doesn't parse or compile; nothing after
    /// it is registered.
    pub fn with_routes<I>(mut self, specs: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = RouteSpec<V>>,
    {
        for spec in specs {
            self.add_spec(spec)?;
        }
        Ok(self)
    }

    /// Registers one spec: each of its rules becomes a separate entry
    pub fn add_spec(&mut self, spec: RouteSpec<V>) -> Result<(), RuleError> {
        let (rules, handler, options) = spec.into_parts();
        for rule in rules {
            let compiled = self.compile(&rule)?;
            self.add_compiled_route(compiled, Rc::clone(&handler), options.clone());
        }
        Ok(())
    }

    /// Parses, compiles and registers `rule`
    ///
    /// # Examples
    ///
    /// ```
    /// use std::rc::Rc;
    /// use screen_router::{handler, MemoryStack, RouteOptions, Router};
    ///
    /// let mut router: Router<str, MemoryStack> = Router::new(MemoryStack::new());
    /// router
    ///     .add_route("/about", handler(|_| Ok(Rc::from("about"))), RouteOptions::new())
    ///     .unwrap();
    /// assert!(router.add_route("/bad/<", handler(|_| Ok(Rc::from(""))), RouteOptions::new()).is_err());
    /// assert_eq!(router.rules().collect::<Vec<_>>(), vec!["/about"]);
    /// ```
    pub fn add_route(
        &mut self,
        rule: &str,
        handler: Handler<V>,
        options: RouteOptions,
    ) -> Result<(), RuleError> {
        let compiled = self.compile(rule)?;
        self.add_compiled_route(compiled, handler, options);
        Ok(())
    }

    /// Registers an already compiled rule
    pub fn add_compiled_route(
        &mut self,
        rule: CompiledRule,
        handler: Handler<V>,
        options: RouteOptions,
    ) {
        self.table.push(rule, handler, options);
    }

    /// Compiles `rule` against this router's converters
    pub fn compile(&self, rule: &str) -> Result<CompiledRule, RuleError> {
        CompiledRule::compile(rule, &self.registry)
    }

    /// Current route string
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Sets the current route and dispatches it
    ///
    /// Setting the route it already holds dispatches nothing and reports
    /// [`Dispatch::Unchanged`]. The route is recorded as current even when
    /// no rule matches it.
    ///
    /// # Errors
    ///
    /// Whatever the selected handler returns, unmodified. The previous route
    /// stays current, so setting the same route again retries the handler.
    pub fn set_route(&mut self, route: impl Into<String>) -> anyhow::Result<Dispatch> {
        let route = route.into();
        if route == self.route {
            return Ok(Dispatch::Unchanged);
        }
        info!(route = %route, "route is now {:?}", route);
        let previous = std::mem::replace(&mut self.route, route.clone());
        self.dispatch(&route).map_err(|err| {
            self.route = previous;
            err
        })
    }

    /// Resolves `route` and shows the resulting view
    ///
    /// Unlike [`set_route`](Self::set_route) this always runs, which makes
    /// it usable to re-render the current route. It does not change
    /// [`route`](Self::route).
    pub fn dispatch(&mut self, route: &str) -> anyhow::Result<Dispatch> {
        let Some(found) = self.table.find(route) else {
            warn!(route, "unable to find a view for {:?}", route);
            return Ok(Dispatch::NotFound);
        };

        let options = &found.entry.options;
        let screen = options.screen_name(route).to_string();
        let view = if options.with_view {
            self.screens.view_for(&screen).cloned()
        } else {
            None
        };
        let handler = Rc::clone(&found.entry.handler);

        let args = RouteArgs {
            route: route.to_string(),
            screen: screen.clone(),
            params: found.params,
            view,
        };
        let view = handler(args)?;

        let change = self.screens.show(view, &screen, &mut self.stack);
        Ok(Dispatch::Resolved { screen, change })
    }

    /// Builds a route from the entries registered under `name`
    ///
    /// `name` is a rule's screen name option or, for unnamed rules, the rule
    /// text. Among several entries with that name, the one whose variables
    /// are all present in `params` and which binds the most of them is used.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::rc::Rc;
    /// use screen_router::{MemoryStack, Params, Router, RouteSpec};
    ///
    /// let router = Router::<str, MemoryStack>::new(MemoryStack::new())
    ///     .with_routes(vec![RouteSpec::new(|_| Ok(Rc::from("settings")))
    ///         .rule("/settings")
    ///         .rule("/settings/<path:subroute>")
    ///         .named("settings")])
    ///     .unwrap();
    ///
    /// assert_eq!(router.url_for("settings", &Params::new()).unwrap(), "/settings");
    /// let params = Params::new().with("subroute", "/video");
    /// assert_eq!(router.url_for("settings", &params).unwrap(), "/settings/video");
    /// ```
    pub fn url_for(&self, name: &str, params: &Params) -> Result<String, UrlBuildError> {
        let mut first: Option<&CompiledRule> = None;
        let mut best: Option<(&CompiledRule, usize)> = None;

        // Prefer the rule binding the most of the supplied params; earliest wins ties
        for entry in self.table.named(name) {
            let rule = &entry.rule;
            first.get_or_insert(rule);
            if !rule.accepts(params) {
                continue;
            }
            let bound = rule.variable_names().count();
            if best.map_or(true, |(_, most)| bound > most) {
                best = Some((rule, bound));
            }
        }

        match best.map(|(rule, _)| rule).or(first) {
            Some(rule) => rule.build(params),
            None => Err(UrlBuildError::UnknownRoute {
                name: name.to_string(),
            }),
        }
    }

    /// Rule texts in registration order
    pub fn rules(&self) -> impl Iterator<Item = &str> {
        self.table.iter().map(|entry| entry.rule.rule())
    }

    pub fn table(&self) -> &RouteTable<V> {
        &self.table
    }

    pub fn registry(&self) -> &ConverterRegistry {
        &self.registry
    }

    /// Displayed screen; `None` until a route has resolved
    pub fn current_screen(&self) -> Option<&Screen<V>> {
        self.screens.current()
    }

    pub fn has_screen(&self, name: &str) -> bool {
        self.screens.has_screen(name)
    }

    pub fn get_screen(&self, name: &str) -> Option<&Screen<V>> {
        self.screens.get_screen(name)
    }

    /// View hosted by screen `name`
    pub fn view_for(&self, name: &str) -> Option<&Rc<V>> {
        self.screens.view_for(name)
    }

    pub fn screens(&self) -> &ScreenArena<V> {
        &self.screens
    }

    /// Drops screen `name` and unlinks its view
    pub fn remove_screen(&mut self, name: &str) -> Option<Rc<V>> {
        self.screens.remove(name, &mut self.stack)
    }

    pub fn stack(&self) -> &S {
        &self.stack
    }

    pub fn stack_mut(&mut self) -> &mut S {
        &mut self.stack
    }
}
