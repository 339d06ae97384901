// NetMotive IP Switcher - Local Storage
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Settings, activity history and the profiles file location.
//!
//! `settings.toml` and `logs.json` live in the config directory next to the
//! default `profiles.json`. Both are read once at startup and rewritten on
//! every change. A poisoned lock is recovered rather than propagated, since
//! every writer replaces the value in a single assignment.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::models::{AppConfig, Result, CONFIG_DIR_NAME, PROFILES_FILE_NAME};

/// One line of the activity history.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: String,
    pub message: String,
}

/// Default configuration directory (`<platform config dir>/ip-switcher`).
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// Limit `path` to its owner, logging when that is not possible.
pub(crate) fn restrict_permissions(path: &Path, mode: u32) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Err(e) = fs::set_permissions(path, fs::Permissions::from_mode(mode)) {
            warn!("Could not set permissions {:o} on {:?}: {}", mode, path, e);
        }
    }
    #[cfg(not(unix))]
    let _ = (path, mode);
}

fn read_or_recover<T, R>(lock: &RwLock<T>, what: &str, read: impl FnOnce(&T) -> R) -> R {
    let guard = lock.read().unwrap_or_else(|poisoned| {
        warn!("Recovering {} after a panic while it was locked", what);
        poisoned.into_inner()
    });
    read(&*guard)
}

fn write_or_recover<T>(lock: &RwLock<T>, what: &str, write: impl FnOnce(&mut T)) {
    let mut guard = lock.write().unwrap_or_else(|poisoned| {
        warn!("Recovering {} after a panic while it was locked", what);
        poisoned.into_inner()
    });
    write(&mut *guard);
}

/// Settings and activity history for one config directory.
#[derive(Debug)]
pub struct DataStore {
    config_dir: PathBuf,
    settings_file: PathBuf,
    logs_file: PathBuf,
    settings: RwLock<AppConfig>,
    logs: RwLock<Vec<LogEntry>>,
}

impl DataStore {
    /// Open the store in the platform config directory.
    pub fn new() -> Self {
        Self::with_config_dir(default_config_dir())
    }

    /// Open the store in `config_dir`, creating it (mode 0700) if needed.
    pub fn with_config_dir(config_dir: PathBuf) -> Self {
        match fs::create_dir_all(&config_dir) {
            Ok(()) => restrict_permissions(&config_dir, 0o700),
            Err(e) => error!("Failed to create config directory {:?}: {}", config_dir, e),
        }

        let store = Self {
            settings_file: config_dir.join("settings.toml"),
            logs_file: config_dir.join("logs.json"),
            config_dir,
            settings: RwLock::new(AppConfig::default()),
            logs: RwLock::new(Vec::new()),
        };

        store.load_settings();
        store.load_logs();
        store
    }

    // === Settings ===

    fn load_settings(&self) {
        if !self.settings_file.exists() {
            debug!("No settings file at {:?}, using defaults", self.settings_file);
            return;
        }

        match AppConfig::load_from_file(&self.settings_file) {
            Ok(config) => {
                write_or_recover(&self.settings, "settings", |s| *s = config);
                info!("Loaded settings from {:?}", self.settings_file);
            }
            Err(e) => error!("Failed to load settings, using defaults: {}", e),
        }
    }

    /// Current settings.
    pub fn settings(&self) -> AppConfig {
        read_or_recover(&self.settings, "settings", AppConfig::clone)
    }

    /// Save `settings` and make them current. Memory is unchanged if saving fails.
    pub fn update_settings(&self, settings: AppConfig) -> Result<()> {
        settings.save_to_file(&self.settings_file)?;
        write_or_recover(&self.settings, "settings", |s| *s = settings);
        Ok(())
    }

    /// Modify the settings in place and save them, logging failures.
    pub fn edit_settings<F>(&self, edit: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut settings = self.settings();
        edit(&mut settings);
        if let Err(e) = self.update_settings(settings) {
            error!("Failed to save settings: {}", e);
        }
    }

    // === Profiles ===

    /// Path of the profiles file, honoring the `profiles_file` override.
    pub fn profiles_path(&self) -> PathBuf {
        self.settings()
            .profiles_file
            .unwrap_or_else(|| self.config_dir.join(PROFILES_FILE_NAME))
    }

    // === Activity history ===

    fn load_logs(&self) {
        let bytes = match fs::read(&self.logs_file) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return,
            Err(e) => {
                error!("Failed to read logs file {:?}: {}", self.logs_file, e);
                return;
            }
        };

        match serde_json::from_slice::<Vec<LogEntry>>(&bytes) {
            Ok(entries) => {
                debug!("Loaded {} activity entries", entries.len());
                write_or_recover(&self.logs, "activity log", |logs| *logs = entries);
            }
            Err(e) => warn!("Ignoring unreadable logs file {:?}: {}", self.logs_file, e),
        }
    }

    fn save_logs(&self) {
        let logs = self.logs();
        let json = match serde_json::to_vec_pretty(&logs) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize activity log: {}", e);
                return;
            }
        };

        match fs::write(&self.logs_file, json) {
            Ok(()) => restrict_permissions(&self.logs_file, 0o600),
            Err(e) => error!("Failed to write logs file {:?}: {}", self.logs_file, e),
        }
    }

    /// All activity entries, oldest first.
    pub fn logs(&self) -> Vec<LogEntry> {
        read_or_recover(&self.logs, "activity log", Vec::clone)
    }

    /// Record an activity entry, dropping the oldest beyond `max_log_entries`.
    pub fn append_log(&self, level: &str, message: &str) {
        let entry = LogEntry {
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            level: level.to_uppercase(),
            message: message.to_string(),
        };
        let limit = self.settings().max_log_entries;

        write_or_recover(&self.logs, "activity log", |logs| {
            logs.push(entry);
            let excess = logs.len().saturating_sub(limit);
            logs.drain(..excess);
        });

        self.save_logs();
    }

    /// Remove every activity entry.
    pub fn clear_logs(&self) {
        write_or_recover(&self.logs, "activity log", Vec::clear);
        self.save_logs();
    }

    /// The config directory this store reads from.
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ThemePreference;

    #[test]
    fn test_settings_persist() {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::with_config_dir(dir.path().to_path_buf());
        store.edit_settings(|s| {
            s.theme = ThemePreference::Dark;
            s.last_adapter = Some("Ethernet".into());
        });

        let reopened = DataStore::with_config_dir(dir.path().to_path_buf());
        assert_eq!(reopened.settings().theme, ThemePreference::Dark);
        assert_eq!(reopened.settings().last_adapter.as_deref(), Some("Ethernet"));
    }

    #[test]
    fn test_profiles_path_default_and_override() {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::with_config_dir(dir.path().to_path_buf());
        assert_eq!(store.profiles_path(), dir.path().join("profiles.json"));

        let custom = dir.path().join("shared").join("team.json");
        store.edit_settings(|s| s.profiles_file = Some(custom.clone()));
        assert_eq!(store.profiles_path(), custom);
    }

    #[test]
    fn test_logs_are_trimmed_and_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::with_config_dir(dir.path().to_path_buf());
        store.edit_settings(|s| s.max_log_entries = 2);

        store.append_log("info", "one");
        store.append_log("info", "two");
        store.append_log("error", "three");

        let logs = store.logs();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].message, "two");
        assert_eq!(logs[1].level, "ERROR");

        let reopened = DataStore::with_config_dir(dir.path().to_path_buf());
        assert_eq!(reopened.logs(), logs);

        reopened.clear_logs();
        assert!(reopened.logs().is_empty());
    }

    #[test]
    fn test_unreadable_logs_start_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("logs.json"), "[{\"level\": ").unwrap();
        let store = DataStore::with_config_dir(dir.path().to_path_buf());
        assert!(store.logs().is_empty());

        store.append_log("info", "fresh");
        assert_eq!(store.logs().len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_files_are_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join("ip-switcher");
        let store = DataStore::with_config_dir(config_dir.clone());
        store.edit_settings(|s| s.confirm_before_apply = false);
        store.append_log("info", "hello");

        let mode = |path: &Path| fs::metadata(path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&config_dir), 0o700);
        assert_eq!(mode(&config_dir.join("settings.toml")), 0o600);
        assert_eq!(mode(&config_dir.join("logs.json")), 0o600);
    }

    #[test]
    fn test_corrupt_settings_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("settings.toml"), "theme = [").unwrap();
        let store = DataStore::with_config_dir(dir.path().to_path_buf());
        assert_eq!(store.settings(), AppConfig::default());
    }
}
