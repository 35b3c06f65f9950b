// File: src/config.rs
// Purpose: Configuration parsing from screen-router.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::history::DEFAULT_MAX_HISTORY;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "screen-router.toml";

/// Router configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub navigation: NavigationConfig,
}

/// History configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Number of routes remembered for `history_back` (default: 20, minimum 1)
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

/// Navigation configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct NavigationConfig {
    /// Route dispatched when a navigator starts
    #[serde(default)]
    pub initial_route: Option<String>,
}

fn default_max_entries() -> usize {
    DEFAULT_MAX_HISTORY
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./screen-router.toml)
    pub fn load_default() -> Result<Self> {
        Self::load(DEFAULT_CONFIG_FILE)
    }

    /// History bound with the minimum applied
    pub fn max_history(&self) -> usize {
        self.history.max_entries.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.history.max_entries, 20);
        assert_eq!(config.navigation.initial_route, None);
    }

    #[test]
    fn test_empty_config() {
        let config = toml::from_str::<Config>("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.history.max_entries, 20);
    }

    #[test]
    fn test_custom_values() {
        let toml = r#"
            [history]
            max_entries = 2

            [navigation]
            initial_route = "/settings"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.max_history(), 2);
        assert_eq!(config.navigation.initial_route.as_deref(), Some("/settings"));
    }

    #[test]
    fn test_zero_history_is_clamped() {
        let config: Config = toml::from_str("[history]\nmax_entries = 0").unwrap();
        assert_eq!(config.max_history(), 1);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let config = Config::load("definitely/not/here/screen-router.toml").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let path = std::env::temp_dir().join(format!(
            "screen-router-config-test-{}.toml",
            std::process::id()
        ));
        fs::write(&path, "[history]\nmax_entries = \"many\"").unwrap();
        let err = Config::load(&path).unwrap_err();
        fs::remove_file(&path).unwrap();
        assert!(err.to_string().starts_with("Failed to parse config file"));
    }
}
