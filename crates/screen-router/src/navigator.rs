/// Application-level navigation
///
/// Wraps the root [`Router`] with a bounded [`History`]. Only routes that
/// resolved to a view are recorded, so `history_back` never lands on a
/// route that showed nothing.

use tracing::debug;

use crate::config::Config;
use crate::history::History;
use crate::screen::ScreenStack;
use crate::{Dispatch, Router};

/// Root router plus navigation history
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
/// use screen_router::{MemoryStack, Navigator, Router, RouteSpec};
///
/// let router = Router::<str, MemoryStack>::new(MemoryStack::new())
///     .with_routes(vec![RouteSpec::new(|args| Ok(Rc::from(args.route.as_str()))).rule("/<page>")])
///     .unwrap();
/// let mut nav = Navigator::new(router);
///
/// nav.navigate("/home").unwrap();
/// nav.navigate("/about").unwrap();
/// nav.history_back().unwrap();
/// assert_eq!(nav.route(), "/home");
/// assert_eq!(nav.history().entries(), vec!["/home"]);
/// ```
pub struct Navigator<V: ?Sized, S> {
    router: Router<V, S>,
    history: History,
    initial_route: Option<String>,
}

impl<V: ?Sized, S: ScreenStack<V>> Navigator<V, S> {
    /// Navigator with the default history bound
    pub fn new(router: Router<V, S>) -> Self {
        Self {
            router,
            history: History::default(),
            initial_route: None,
        }
    }

    /// Navigator using the history bound and initial route of `config`
    ///
    /// Nothing is dispatched until [`start`](Self::start).
    pub fn with_config(router: Router<V, S>, config: &Config) -> Self {
        Self {
            router,
            history: History::new(config.max_history()),
            initial_route: config.navigation.initial_route.clone(),
        }
    }

    /// Replaces the history bound (functional builder)
    pub fn with_max_history(mut self, max_entries: usize) -> Self {
        self.history.set_max_entries(max_entries);
        self
    }

    /// Navigates to the configured initial route, if any
    pub fn start(&mut self) -> anyhow::Result<Option<Dispatch>> {
        match self.initial_route.clone() {
            Some(route) => self.navigate(route).map(Some),
            None => Ok(None),
        }
    }

    /// Sets the root route, recording it when it resolves
    ///
    /// # Errors
    ///
    /// Whatever the selected handler returns, unmodified. A failed handler
    /// leaves history untouched.
    pub fn navigate(&mut self, route: impl Into<String>) -> anyhow::Result<Dispatch> {
        let route = route.into();
        let dispatch = self.router.set_route(route.as_str())?;
        if dispatch.is_resolved() {
            self.history.record(&route);
        }
        Ok(dispatch)
    }

    /// Returns to the previous recorded route
    ///
    /// Drops the most recent history entry and navigates to the one before
    /// it. Returns `None`, doing nothing else, when no earlier entry exists.
    pub fn history_back(&mut self) -> anyhow::Result<Option<Dispatch>> {
        let Some(previous) = self.history.back().map(str::to_string) else {
            debug!("history exhausted");
            return Ok(None);
        };
        debug!(route = %previous, "history back");
        self.navigate(previous).map(Some)
    }

    /// Current root route
    pub fn route(&self) -> &str {
        self.router.route()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn router(&self) -> &Router<V, S> {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut Router<V, S> {
        &mut self.router
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryStack, RouteSpec};
    use pretty_assertions::assert_eq;
    use std::rc::Rc;

    fn pages() -> Router<String, MemoryStack> {
        Router::new(MemoryStack::new())
            .with_routes(vec![
                RouteSpec::new(|args| Ok(Rc::new(args.route))).rule("/<page>"),
                RouteSpec::new(|_| Ok(Rc::new("root".to_string()))).rule("/"),
            ])
            .unwrap()
    }

    #[test]
    fn test_bounded_history() {
        let mut nav = Navigator::new(pages()).with_max_history(2);
        for route in ["/", "/about", "/settings", "/contact"] {
            nav.navigate(route).unwrap();
        }
        assert_eq!(nav.history().entries(), vec!["/settings", "/contact"]);
    }

    #[test]
    fn test_repeated_route_recorded_once() {
        let mut nav = Navigator::new(pages());
        nav.navigate("/x").unwrap();
        assert_eq!(nav.navigate("/x").unwrap(), Dispatch::Unchanged);
        assert_eq!(nav.history().entries(), vec!["/x"]);
    }

    #[test]
    fn test_unresolved_routes_not_recorded() {
        let mut nav = Navigator::new(pages());
        nav.navigate("/a").unwrap();
        assert_eq!(nav.navigate("/a/b").unwrap(), Dispatch::NotFound);
        assert_eq!(nav.history().entries(), vec!["/a"]);
        assert_eq!(nav.route(), "/a/b");
    }

    #[test]
    fn test_back_with_single_entry() {
        let mut nav = Navigator::new(pages());
        nav.navigate("/a").unwrap();
        assert!(nav.history_back().unwrap().is_none());
        assert!(nav.history().is_empty());
        assert_eq!(nav.route(), "/a");
    }

    #[test]
    fn test_back_reuses_screen() {
        let mut nav = Navigator::new(pages());
        nav.navigate("/a").unwrap();
        nav.navigate("/b").unwrap();

        let dispatch = nav.history_back().unwrap().unwrap();
        assert_eq!(dispatch.screen(), Some("/a"));
        assert_eq!(nav.route(), "/a");
        assert_eq!(nav.history().entries(), vec!["/a"]);
        assert_eq!(nav.router().stack().displayed(), Some("/a"));
    }

    #[test]
    fn test_start_uses_config() {
        let mut config = Config::default();
        config.history.max_entries = 0;
        config.navigation.initial_route = Some("/home".to_string());

        let mut nav = Navigator::with_config(pages(), &config);
        assert_eq!(nav.history().max_entries(), 1);
        assert!(nav.start().unwrap().unwrap().is_resolved());
        assert_eq!(nav.route(), "/home");
    }
}
