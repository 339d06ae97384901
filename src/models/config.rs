// NetMotive IP Switcher - Application Configuration
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Application configuration model.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    /// Follow system theme.
    #[default]
    System,
    /// Force light theme.
    Light,
    /// Force dark theme.
    Dark,
}

impl ThemePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Theme preference.
    #[serde(default)]
    pub theme: ThemePreference,

    /// Ask for confirmation before applying a profile.
    #[serde(default = "default_true")]
    pub confirm_before_apply: bool,

    /// Adapter selected when the window was last closed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_adapter: Option<String>,

    /// Override for the profiles file location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profiles_file: Option<PathBuf>,

    /// Maximum activity log entries to keep.
    #[serde(default = "default_max_log_entries")]
    pub max_log_entries: usize,

    /// Window width.
    #[serde(default = "default_window_width")]
    pub window_width: i32,

    /// Window height.
    #[serde(default = "default_window_height")]
    pub window_height: i32,

    /// Window maximized state.
    #[serde(default)]
    pub window_maximized: bool,
}

fn default_true() -> bool {
    true
}

fn default_max_log_entries() -> usize {
    1000
}

fn default_window_width() -> i32 {
    520
}

fn default_window_height() -> i32 {
    640
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: ThemePreference::System,
            confirm_before_apply: true,
            last_adapter: None,
            profiles_file: None,
            max_log_entries: default_max_log_entries(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            window_maximized: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML file.
    pub fn load_from_file(path: &std::path::Path) -> Result<Self, super::Error> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| super::Error::ConfigReadFailed(e.to_string()))?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to TOML file with restrictive permissions (0600).
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), super::Error> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .map_err(|e| super::Error::ConfigWriteFailed(e.to_string()))?;
        crate::storage::restrict_permissions(path, 0o600);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");

        let mut config = AppConfig::default();
        config.theme = ThemePreference::Dark;
        config.last_adapter = Some("Wi-Fi".to_string());
        config.save_to_file(&path).unwrap();

        let loaded = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_partial_file_uses_defaults() {
        let config: AppConfig = toml::from_str("theme = \"light\"\n").unwrap();
        assert_eq!(config.theme, ThemePreference::Light);
        assert!(config.confirm_before_apply);
        assert_eq!(config.max_log_entries, 1000);
        assert!(config.profiles_file.is_none());
    }

    #[test]
    fn test_config_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "theme = [").unwrap();
        assert!(matches!(
            AppConfig::load_from_file(&path),
            Err(crate::models::Error::ConfigParseFailed(_))
        ));
    }
}
