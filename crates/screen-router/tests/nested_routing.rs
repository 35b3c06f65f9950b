/// Nested routers: a parent view owning a child router
///
/// The parent captures everything after `/settings` with a `path` variable
/// and forwards it to the child, which keeps its own screens and route.

use pretty_assertions::assert_eq;
use screen_router::{Dispatch, MemoryStack, Navigator, RouteSpec, Router};
use std::cell::RefCell;
use std::rc::Rc;

enum View {
    Label(String),
    Settings(RefCell<Router<str, MemoryStack>>),
}

fn settings_router() -> Router<str, MemoryStack> {
    Router::new(MemoryStack::new())
        .with_routes(vec![
            RouteSpec::new(|_| Ok(Rc::from("general"))).rule("/"),
            RouteSpec::new(|args| Ok(Rc::from(format!("{} settings", &args.route[1..]))))
                .rule("/<section>"),
        ])
        .unwrap()
}

fn app() -> Navigator<View, MemoryStack> {
    let router = Router::new(MemoryStack::new())
        .with_routes(vec![
            RouteSpec::new(|_| Ok(Rc::new(View::Label("menu".to_string())))).rule("/"),
            RouteSpec::new(|args| {
                let view: Rc<View> = args
                    .view
                    .clone()
                    .unwrap_or_else(|| Rc::new(View::Settings(RefCell::new(settings_router()))));
                if let View::Settings(child) = &*view {
                    let subroute = args.get_str("subroute").unwrap_or("/");
                    child.borrow_mut().set_route(subroute)?;
                }
                Ok(view)
            })
            .rule("/settings")
            .rule("/settings/<path:subroute>")
            .named("settings")
            .with_view(),
        ])
        .unwrap();
    Navigator::new(router)
}

fn child_route(nav: &Navigator<View, MemoryStack>) -> (String, Option<String>) {
    match &**nav.router().view_for("settings").unwrap() {
        View::Settings(child) => {
            let child = child.borrow();
            (
                child.route().to_string(),
                child.stack().displayed().map(str::to_string),
            )
        }
        View::Label(text) => panic!("settings screen hosts label {:?}", text),
    }
}

#[test]
fn test_child_follows_parent_route() {
    let mut nav = app();

    nav.navigate("/settings").unwrap();
    assert_eq!(child_route(&nav), ("/".to_string(), Some("/".to_string())));

    nav.navigate("/settings/video").unwrap();
    assert_eq!(
        child_route(&nav),
        ("/video".to_string(), Some("/video".to_string()))
    );

    let child = match &**nav.router().view_for("settings").unwrap() {
        View::Settings(child) => child.borrow().view_for("/video").map(|v| v.to_string()),
        View::Label(_) => None,
    };
    assert_eq!(child.as_deref(), Some("video settings"));
}

#[test]
fn test_parent_screen_survives_child_navigation() {
    let mut nav = app();

    nav.navigate("/settings/audio").unwrap();
    let settings = Rc::clone(nav.router().view_for("settings").unwrap());
    nav.navigate("/").unwrap();
    nav.navigate("/settings/video").unwrap();

    assert!(Rc::ptr_eq(nav.router().view_for("settings").unwrap(), &settings));
    assert_eq!(nav.router().screens().len(), 2);
    assert_eq!(
        nav.history().entries(),
        vec!["/settings/audio", "/", "/settings/video"]
    );
}

#[test]
fn test_history_back_restores_child_route() {
    let mut nav = app();
    nav.navigate("/settings/audio").unwrap();
    nav.navigate("/settings/video").unwrap();

    let dispatch = nav.history_back().unwrap().unwrap();
    assert_eq!(dispatch.screen(), Some("settings"));
    assert_eq!(child_route(&nav).0, "/audio");
}

#[test]
fn test_child_not_found_leaves_child_display() {
    let mut nav = app();
    nav.navigate("/settings/audio").unwrap();

    // The parent resolves; the child has no rule for a nested path
    let dispatch = nav.navigate("/settings/audio/advanced").unwrap();
    assert!(matches!(dispatch, Dispatch::Resolved { .. }));
    assert_eq!(
        child_route(&nav),
        ("/audio/advanced".to_string(), Some("/audio".to_string()))
    );
}
