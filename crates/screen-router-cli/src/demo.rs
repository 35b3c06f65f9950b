/// Demo application replayed by the CLI
///
/// A menu, an about page, a user page and a settings screen. Settings owns
/// a nested router: everything after `/settings` is handed to it, and the
/// settings screen itself is reused across sub-pages.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use screen_router::{Config, Navigator, RouteSpec, Router, RuleError};

use crate::console::ConsoleStack;

/// Sub-page shown when `/settings` carries no subroute
pub const DEFAULT_SETTINGS_PAGE: &str = "/audio";

pub enum DemoView {
    Label(String),
    Settings(RefCell<Router<str, ConsoleStack>>),
}

impl DemoView {
    fn label(text: impl Into<String>) -> Rc<Self> {
        Rc::new(DemoView::Label(text.into()))
    }

    /// One-line description for the replay report
    pub fn describe(&self) -> String {
        match self {
            DemoView::Label(text) => text.clone(),
            DemoView::Settings(child) => {
                let child = child.borrow();
                let page = child
                    .current_screen()
                    .and_then(|screen| screen.view())
                    .map(|view| view.to_string())
                    .unwrap_or_else(|| "empty".to_string());
                format!("settings [{}]", page)
            }
        }
    }
}

fn settings_router() -> Result<Router<str, ConsoleStack>, RuleError> {
    Router::new(ConsoleStack::nested(1)).with_routes(vec![
        RouteSpec::new(|_| Ok(Rc::from("audio settings"))).rule("/audio"),
        RouteSpec::new(|_| Ok(Rc::from("video settings"))).rule("/video"),
    ])
}

pub fn router() -> Result<Router<DemoView, ConsoleStack>, RuleError> {
    Router::new(ConsoleStack::new()).with_routes(vec![
        RouteSpec::new(|_| Ok(DemoView::label("index"))).rule("/"),
        RouteSpec::new(|_| Ok(DemoView::label("about this app"))).rule("/about"),
        RouteSpec::new(|args| {
            let id = args.get_int("id").unwrap_or_default();
            Ok(DemoView::label(format!("user #{}", id)))
        })
        .rule("/users/<int:id>")
        .named("user"),
        RouteSpec::new(|args| {
            let view = match args.view.clone() {
                Some(view) => view,
                None => Rc::new(DemoView::Settings(RefCell::new(settings_router()?))),
            };
            if let DemoView::Settings(child) = &*view {
                let subroute = args.get_str("subroute").unwrap_or(DEFAULT_SETTINGS_PAGE);
                child.borrow_mut().set_route(subroute)?;
            }
            Ok(view)
        })
        .rule("/settings")
        .rule("/settings/<path:subroute>")
        .named("settings")
        .with_view(),
        RouteSpec::new(|_| Ok(DemoView::label("credits"))).rule("/credits"),
    ])
}

pub fn navigator(config: &Config) -> Result<Navigator<DemoView, ConsoleStack>> {
    Ok(Navigator::with_config(router()?, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use screen_router::Dispatch;

    fn describe(nav: &Navigator<DemoView, ConsoleStack>) -> String {
        nav.router()
            .current_screen()
            .and_then(|screen| screen.view())
            .map(|view| view.describe())
            .unwrap_or_default()
    }

    #[test]
    fn test_settings_defaults_to_audio() {
        let mut nav = navigator(&Config::default()).unwrap();
        nav.navigate("/settings").unwrap();
        assert_eq!(describe(&nav), "settings [audio settings]");
    }

    #[test]
    fn test_settings_screen_created_once() {
        let mut nav = navigator(&Config::default()).unwrap();
        nav.navigate("/settings/video").unwrap();
        nav.navigate("/").unwrap();
        nav.navigate("/settings/audio").unwrap();

        assert_eq!(describe(&nav), "settings [audio settings]");
        assert_eq!(nav.router().stack().screens(), ["settings", "/"]);
    }

    #[test]
    fn test_user_page() {
        let mut nav = navigator(&Config::default()).unwrap();
        nav.navigate("/users/12").unwrap();
        assert_eq!(describe(&nav), "user #12");
        assert_eq!(nav.router().current_screen().unwrap().name(), "user");
    }

    #[test]
    fn test_unknown_route() {
        let mut nav = navigator(&Config::default()).unwrap();
        assert_eq!(nav.navigate("/nowhere").unwrap(), Dispatch::NotFound);
        assert_eq!(describe(&nav), "");
    }
}
