/// Screen arena and view ↔ screen linkage
///
/// Screens live in a vector indexed by name. Views are linked through a
/// side index keyed by view identity (the `Rc` allocation address), which
/// stays valid for as long as the arena holds the view.

use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;

use super::{Screen, ScreenChange, ScreenStack};

/// Identity of a view allocation
fn view_key<V: ?Sized>(view: &Rc<V>) -> usize {
    Rc::as_ptr(view) as *const () as usize
}

/// Screens known to one router, plus which one is displayed
pub struct ScreenArena<V: ?Sized> {
    screens: Vec<Screen<V>>,
    by_name: HashMap<String, usize>,
    by_view: HashMap<usize, usize>,
    current: Option<usize>,
}

impl<V: ?Sized> ScreenArena<V> {
    pub fn new() -> Self {
        Self {
            screens: Vec::new(),
            by_name: HashMap::new(),
            by_view: HashMap::new(),
            current: None,
        }
    }

    pub fn has_screen(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn get_screen(&self, name: &str) -> Option<&Screen<V>> {
        self.by_name.get(name).map(|&idx| &self.screens[idx])
    }

    /// View linked to the screen `name`
    pub fn view_for(&self, name: &str) -> Option<&Rc<V>> {
        self.get_screen(name).and_then(Screen::view)
    }

    /// Screen hosting `view`, if it is linked
    pub fn screen_of(&self, view: &Rc<V>) -> Option<&Screen<V>> {
        self.by_view
            .get(&view_key(view))
            .map(|&idx| &self.screens[idx])
    }

    /// Currently displayed screen
    pub fn current(&self) -> Option<&Screen<V>> {
        self.current.map(|idx| &self.screens[idx])
    }

    /// Screen names in creation order (removals may reorder)
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.screens.iter().map(Screen::name)
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    /// Shows `view` under the screen identity `name`
    ///
    /// - A view that is already linked keeps its screen, which is brought
    ///   back if it isn't displayed.
    /// - Otherwise an existing screen `name` has its old view unlinked and
    ///   the new one linked in its place.
    /// - Otherwise a new screen `name` is created around the view.
    ///
    /// A linked view is by definition identical to its screen's view, so
    /// re-showing the same view never replaces anything.
    pub fn show<S>(&mut self, view: Rc<V>, name: &str, stack: &mut S) -> ScreenChange
    where
        S: ScreenStack<V> + ?Sized,
    {
        if let Some(&idx) = self.by_view.get(&view_key(&view)) {
            if self.current == Some(idx) {
                debug!(screen = self.screens[idx].name(), "screen kept");
                return ScreenChange::Kept;
            }
            self.display(idx, stack);
            debug!(screen = self.screens[idx].name(), "screen reused");
            return ScreenChange::Reused;
        }

        if let Some(&idx) = self.by_name.get(name) {
            self.unlink(idx);
            self.link(idx, view);
            self.display(idx, stack);
            debug!(screen = name, "screen view replaced");
            return ScreenChange::Replaced;
        }

        let idx = self.screens.len();
        self.screens.push(Screen::new(name));
        self.by_name.insert(name.to_string(), idx);
        self.link(idx, view);
        self.display(idx, stack);
        debug!(screen = name, "screen created");
        ScreenChange::Created
    }

    /// Removes screen `name`, returning the view it hosted
    pub fn remove<S>(&mut self, name: &str, stack: &mut S) -> Option<Rc<V>>
    where
        S: ScreenStack<V> + ?Sized,
    {
        let idx = self.by_name.remove(name)?;
        let view = self.unlink(idx);
        let screen = self.screens.swap_remove(idx);

        // The last screen moved into `idx`
        if idx < self.screens.len() {
            let moved = &self.screens[idx];
            self.by_name.insert(moved.name.clone(), idx);
            if let Some(moved_view) = &moved.view {
                self.by_view.insert(view_key(moved_view), idx);
            }
        }
        let last = self.screens.len();
        self.current = match self.current {
            Some(cur) if cur == idx => None,
            Some(cur) if cur == last => Some(idx),
            other => other,
        };

        stack.remove_screen(&screen);
        debug!(screen = name, "screen removed");
        view
    }

    /// Links `view` into screen `idx`, both sides in one step
    fn link(&mut self, idx: usize, view: Rc<V>) {
        let key = view_key(&view);
        // A view sits in at most one screen
        if let Some(&other) = self.by_view.get(&key) {
            if other != idx {
                self.unlink(other);
            }
        }
        if self.screens[idx].view.is_some() {
            self.unlink(idx);
        }
        self.screens[idx].view = Some(view);
        self.by_view.insert(key, idx);
    }

    /// Clears both sides of screen `idx`'s link
    fn unlink(&mut self, idx: usize) -> Option<Rc<V>> {
        let view = self.screens[idx].view.take()?;
        self.by_view.remove(&view_key(&view));
        Some(view)
    }

    fn display<S>(&mut self, idx: usize, stack: &mut S)
    where
        S: ScreenStack<V> + ?Sized,
    {
        self.current = Some(idx);
        stack.switch_to(&self.screens[idx]);
    }
}

impl<V: ?Sized> Default for ScreenArena<V> {
    fn default() -> Self {
        Self::new()
    }
}
