/// In-memory screen stack
///
/// Records the transitions it is asked to perform instead of rendering
/// anything. Useful for tests, for headless hosts, and for nested routers
/// whose content is drawn by their parent.

use super::{Screen, ScreenStack};

/// A transition requested by the router
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackEvent {
    SwitchedTo(String),
    Removed(String),
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStack {
    screens: Vec<String>,
    displayed: Option<String>,
    events: Vec<StackEvent>,
}

impl MemoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the screen shown last
    pub fn displayed(&self) -> Option<&str> {
        self.displayed.as_deref()
    }

    /// Names of the screens on the stack, in the order they were added
    pub fn screens(&self) -> &[String] {
        &self.screens
    }

    pub fn has_screen(&self, name: &str) -> bool {
        self.screens.iter().any(|s| s == name)
    }

    pub fn events(&self) -> &[StackEvent] {
        &self.events
    }
}

impl<V: ?Sized> ScreenStack<V> for MemoryStack {
    fn switch_to(&mut self, screen: &Screen<V>) {
        let name = screen.name();
        if !self.has_screen(name) {
            self.screens.push(name.to_string());
        }
        self.displayed = Some(name.to_string());
        self.events.push(StackEvent::SwitchedTo(name.to_string()));
    }

    fn remove_screen(&mut self, screen: &Screen<V>) {
        let name = screen.name();
        self.screens.retain(|s| s != name);
        if self.displayed.as_deref() == Some(name) {
            self.displayed = None;
        }
        self.events.push(StackEvent::Removed(name.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_and_remove() {
        let mut stack = MemoryStack::new();
        let screen: Screen<str> = Screen::new("a");

        stack.switch_to(&screen);
        stack.switch_to(&screen);
        assert_eq!(stack.screens(), ["a".to_string()]);
        assert_eq!(stack.displayed(), Some("a"));

        stack.remove_screen(&screen);
        assert!(stack.screens().is_empty());
        assert_eq!(stack.displayed(), None);
        assert_eq!(stack.events().len(), 3);
    }
}
