/// Screens and the host screen stack
///
/// A [`Screen`] is the stable container a view is shown in. The router keeps
/// its screens in a [`ScreenArena`] indexed by name, with a side index from
/// view identity back to the hosting screen, so views never own their screen
/// and no reference cycle exists. The host GUI only sees the transitions,
/// through the [`ScreenStack`] trait.

use std::fmt;
use std::rc::Rc;

pub mod arena;
pub mod memory;

pub use arena::ScreenArena;
pub use memory::{MemoryStack, StackEvent};

/// A named container hosting at most one view
pub struct Screen<V: ?Sized> {
    name: String,
    view: Option<Rc<V>>,
}

impl<V: ?Sized> Screen<V> {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            view: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// View currently linked to this screen
    pub fn view(&self) -> Option<&Rc<V>> {
        self.view.as_ref()
    }
}

impl<V: ?Sized> fmt::Debug for Screen<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Screen")
            .field("name", &self.name)
            .field("has_view", &self.view.is_some())
            .finish()
    }
}

/// Host-side screen stack driven by the router
///
/// `switch_to` is called whenever a screen must become the displayed one,
/// including after its view was replaced; hosts re-read
/// [`Screen::view`] there. Screens the host hasn't seen before are new.
pub trait ScreenStack<V: ?Sized> {
    fn switch_to(&mut self, screen: &Screen<V>);

    fn remove_screen(&mut self, screen: &Screen<V>);
}

/// What a dispatch did to the screen stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenChange {
    /// A new screen was created for the view and displayed
    Created,
    /// An existing screen got a different view and was displayed
    Replaced,
    /// The view was already linked; its screen was brought back
    Reused,
    /// The view was already linked to the displayed screen
    Kept,
}
