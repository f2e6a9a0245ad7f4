//! Settings document load/save.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while reading or writing the settings document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the settings file.
    #[error("failed to read config {path}: {message}")]
    ReadFailed {
        /// The path that failed.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Failed to parse the settings file.
    #[error("failed to parse config {path}: {message}")]
    ParseFailed {
        /// The path that failed.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Failed to write the settings file.
    #[error("failed to write config {path}: {message}")]
    WriteFailed {
        /// The path that failed.
        path: PathBuf,
        /// Error message.
        message: String,
    },
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// The on-disk settings document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Module identifier → enabled flag.
    #[serde(default)]
    pub modules: BTreeMap<String, bool>,
}

/// The settings document plus the path it persists to.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    settings: Settings,
    path: PathBuf,
}

impl ConfigStore {
    /// Load the settings document from `path`.
    ///
    /// A missing file yields default (empty) settings; the file is created
    /// on the first [`Self::save`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: impl Into<PathBuf>) -> ConfigResult<Self> {
        let path = path.into();

        if !path.exists() {
            debug!(path = %path.display(), "No config file, starting from defaults");
            return Ok(Self {
                settings: Settings::default(),
                path,
            });
        }

        let content =
            std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadFailed {
                path: path.clone(),
                message: e.to_string(),
            })?;

        let settings: Settings =
            toml::from_str(&content).map_err(|e| ConfigError::ParseFailed {
                path: path.clone(),
                message: e.to_string(),
            })?;

        info!(path = %path.display(), modules = settings.modules.len(), "Loaded config");
        Ok(Self { settings, path })
    }

    /// The path this store persists to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The enabled flag for a module, if one has been recorded.
    #[must_use]
    pub fn module_enabled(&self, id: &str) -> Option<bool> {
        self.settings.modules.get(id).copied()
    }

    /// Record a module's enabled flag in memory.
    pub fn set_module_enabled(&mut self, id: impl Into<String>, enabled: bool) {
        self.settings.modules.insert(id.into(), enabled);
    }

    /// Write the settings document to disk, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self) -> ConfigResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteFailed {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        }

        let content =
            toml::to_string_pretty(&self.settings).map_err(|e| ConfigError::WriteFailed {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        std::fs::write(&self.path, content).map_err(|e| ConfigError::WriteFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        debug!(path = %self.path.display(), "Saved config");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_defaults() {
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::load(temp.path().join("config.toml")).unwrap();
        assert_eq!(store.module_enabled("linux-blur"), None);
    }

    #[test]
    fn test_save_and_reload() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");

        let mut store = ConfigStore::load(&path).unwrap();
        store.set_module_enabled("discord-tweaks", true);
        store.set_module_enabled("experimental", false);
        store.save().unwrap();

        let reloaded = ConfigStore::load(&path).unwrap();
        assert_eq!(reloaded.module_enabled("discord-tweaks"), Some(true));
        assert_eq!(reloaded.module_enabled("experimental"), Some(false));
    }

    #[test]
    fn test_modules_namespace_on_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");

        let mut store = ConfigStore::load(&path).unwrap();
        store.set_module_enabled("linux-blur", true);
        store.save().unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("[modules]"));
        assert!(raw.contains("linux-blur"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[modules\nbroken").unwrap();

        let err = ConfigStore::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseFailed { .. }));
    }
}
