/// Bounded navigation history
///
/// Route strings are appended on every resolved navigation. Consecutive
/// duplicates collapse into one entry and the oldest entries are dropped
/// once the bound is exceeded.

use std::collections::VecDeque;

/// Default bound on the number of remembered routes
pub const DEFAULT_MAX_HISTORY: usize = 20;

/// Trail of dispatched route strings, oldest first
///
/// # Examples
///
/// ```
/// use screen_router::History;
///
/// let mut history = History::new(2);
/// for route in ["/", "/about", "/settings", "/contact"] {
///     history.record(route);
/// }
/// assert_eq!(history.entries(), vec!["/settings", "/contact"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: VecDeque<String>,
    max_entries: usize,
}

impl History {
    /// History bounded to `max_entries` (at least 1)
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries: max_entries.max(1),
        }
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Changes the bound, dropping the oldest entries if needed
    pub fn set_max_entries(&mut self, max_entries: usize) {
        self.max_entries = max_entries.max(1);
        self.truncate();
    }

    /// Appends `route` unless it equals the last entry
    ///
    /// Returns whether an entry was added.
    pub fn record(&mut self, route: &str) -> bool {
        if self.last() == Some(route) {
            return false;
        }
        self.entries.push_back(route.to_string());
        self.truncate();
        true
    }

    /// Drops the most recent entry and returns the new last one
    pub fn back(&mut self) -> Option<&str> {
        self.entries.pop_back();
        self.last()
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    /// Entries, oldest first
    pub fn entries(&self) -> Vec<&str> {
        self.entries.iter().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn truncate(&mut self) {
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}
