use colored::Colorize;
use screen_router::{Screen, ScreenStack};

/// Screen stack that prints its transitions
///
/// `depth` indents the output of nested routers under their parent.
#[derive(Debug, Default)]
pub struct ConsoleStack {
    depth: usize,
    screens: Vec<String>,
}

impl ConsoleStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nested(depth: usize) -> Self {
        Self {
            depth,
            screens: Vec::new(),
        }
    }

    /// Screens added so far, in order
    pub fn screens(&self) -> &[String] {
        &self.screens
    }

    fn indent(&self) -> String {
        "  ".repeat(self.depth + 1)
    }
}

impl<V: ?Sized> ScreenStack<V> for ConsoleStack {
    fn switch_to(&mut self, screen: &Screen<V>) {
        let name = screen.name();
        let marker = if self.screens.iter().any(|s| s == name) {
            "↺".cyan()
        } else {
            self.screens.push(name.to_string());
            "+".green()
        };
        println!("{}{} screen {}", self.indent(), marker, name.bold());
    }

    fn remove_screen(&mut self, screen: &Screen<V>) {
        let name = screen.name();
        self.screens.retain(|s| s != name);
        println!("{}{} screen {}", self.indent(), "-".red(), name.bold());
    }
}
