//! Shell configuration, persisted as JSON in the per-user config directory.
//!
//! Mirrors the storefront section settings: mobile display mode, taskbar
//! edge, taskbar height, and the cart fallback URL.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Window width below which the mobile behavior kicks in.
pub const MOBILE_BREAKPOINT: f32 = 768.0;

/// How the taskbar behaves on narrow displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MobileBehavior {
    Mini,
    Hidden,
    Full,
}

/// Resolved rendering mode for the taskbar at the current window width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskbarDisplay {
    /// Everything: app tray, cart, two-line clock.
    Full,
    /// Compact: no app tray, time-only clock.
    Mini,
    /// No taskbar at all.
    Hidden,
}

/// Which screen edge the taskbar docks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskbarPosition {
    Top,
    Bottom,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub mobile_behavior: MobileBehavior,
    pub position: TaskbarPosition,
    pub taskbar_height: f32,
    pub cart_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mobile_behavior: MobileBehavior::Mini,
            position: TaskbarPosition::Bottom,
            taskbar_height: 28.0,
            cart_url: "/cart".to_string(),
        }
    }
}

impl Config {
    /// Body padding (top, bottom) keeping fixed page content clear of the
    /// taskbar: the configured height plus a 2px border on the docked edge.
    pub fn content_inset(&self) -> (f32, f32) {
        let inset = self.taskbar_height + 2.0;
        match self.position {
            TaskbarPosition::Top => (inset, 0.0),
            TaskbarPosition::Bottom => (0.0, inset),
        }
    }

    /// How the taskbar should render at `window_width`. Wide windows always
    /// get the full layout; narrow windows follow the configured mobile
    /// behavior.
    pub fn taskbar_display(&self, window_width: f32) -> TaskbarDisplay {
        if window_width >= MOBILE_BREAKPOINT {
            return TaskbarDisplay::Full;
        }
        match self.mobile_behavior {
            MobileBehavior::Full => TaskbarDisplay::Full,
            MobileBehavior::Mini => TaskbarDisplay::Mini,
            MobileBehavior::Hidden => TaskbarDisplay::Hidden,
        }
    }
}

/// Loads and saves the config file.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        let path = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("win98-shell")
            .join("config.json");
        Self { path }
    }

    #[cfg(test)]
    fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the config, falling back to defaults when the file is missing
    /// or malformed. Never fatal.
    pub fn load(&self) -> Config {
        match self.try_load() {
            Ok(config) => config,
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Config::default()
            }
            Err(e) => {
                log::warn!("failed to load {}: {}, using defaults", self.path.display(), e);
                Config::default()
            }
        }
    }

    fn try_load(&self) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_section_defaults() {
        let config = Config::default();
        assert_eq!(config.mobile_behavior, MobileBehavior::Mini);
        assert_eq!(config.position, TaskbarPosition::Bottom);
        assert_eq!(config.taskbar_height, 28.0);
        assert_eq!(config.cart_url, "/cart");
    }

    #[test]
    fn test_content_inset_follows_position() {
        let mut config = Config::default();
        assert_eq!(config.content_inset(), (0.0, 30.0));
        config.position = TaskbarPosition::Top;
        config.taskbar_height = 32.0;
        assert_eq!(config.content_inset(), (34.0, 0.0));
    }

    #[test]
    fn test_taskbar_display_wide_ignores_mobile_behavior() {
        let mut config = Config::default();
        config.mobile_behavior = MobileBehavior::Hidden;
        assert_eq!(config.taskbar_display(1024.0), TaskbarDisplay::Full);
        assert_eq!(config.taskbar_display(MOBILE_BREAKPOINT), TaskbarDisplay::Full);
    }

    #[test]
    fn test_taskbar_display_narrow_follows_mobile_behavior() {
        let mut config = Config::default();
        assert_eq!(config.taskbar_display(400.0), TaskbarDisplay::Mini);
        config.mobile_behavior = MobileBehavior::Hidden;
        assert_eq!(config.taskbar_display(400.0), TaskbarDisplay::Hidden);
        config.mobile_behavior = MobileBehavior::Full;
        assert_eq!(config.taskbar_display(400.0), TaskbarDisplay::Full);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = std::env::temp_dir().join("win98-shell-test-missing");
        let manager = ConfigManager::with_path(dir.join("nope.json"));
        let config = manager.load();
        assert_eq!(config.position, TaskbarPosition::Bottom);
    }

    #[test]
    fn test_save_and_reload_roundtrip() {
        let dir = std::env::temp_dir().join("win98-shell-test-save");
        let manager = ConfigManager::with_path(dir.join("config.json"));
        let mut config = Config::default();
        config.position = TaskbarPosition::Top;
        config.cart_url = "/basket".to_string();
        manager.save(&config).unwrap();

        let loaded = manager.load();
        assert_eq!(loaded.position, TaskbarPosition::Top);
        assert_eq!(loaded.cart_url, "/basket");
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = std::env::temp_dir().join("win98-shell-test-bad");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        fs::write(&path, "{ not json").unwrap();
        let manager = ConfigManager::with_path(path);
        let config = manager.load();
        assert_eq!(config.taskbar_height, 28.0);
        let _ = fs::remove_dir_all(&dir);
    }
}
