//! Directory scaffolding for the Vitrine home directory.
//!
//! # Layout
//!
//! ```text
//! ~/.vitrine/                    (VitrineHome)
//! ├── modules/                     (external, user-writable modules)
//! └── config.toml                  (module enable/disable flags)
//! ```

use std::io;
use std::path::{Path, PathBuf};

/// Global Vitrine home directory (`~/.vitrine/` or `$VITRINE_HOME`).
///
/// Holds the settings document and the external module directory.
#[derive(Debug, Clone)]
pub struct VitrineHome {
    root: PathBuf,
}

impl VitrineHome {
    /// Resolve the home directory.
    ///
    /// Checks `$VITRINE_HOME` first, then falls back to `$HOME/.vitrine/`.
    ///
    /// # Errors
    ///
    /// Returns an error if `$VITRINE_HOME` is relative, or if neither
    /// `$VITRINE_HOME` nor `$HOME` is set.
    pub fn resolve() -> io::Result<Self> {
        let root = if let Ok(custom) = std::env::var("VITRINE_HOME") {
            let p = PathBuf::from(&custom);
            if !p.is_absolute() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "VITRINE_HOME must be an absolute path",
                ));
            }
            p
        } else {
            let home = std::env::var("HOME").map_err(|_| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    "neither VITRINE_HOME nor HOME environment variable is set",
                )
            })?;
            PathBuf::from(home).join(".vitrine")
        };

        Ok(Self { root })
    }

    /// Use an explicit root (tests, embedding hosts with their own layout).
    #[must_use]
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The home root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the settings document.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// The external, user-writable module directory.
    #[must_use]
    pub fn modules_dir(&self) -> PathBuf {
        self.root.join("modules")
    }

    /// Create the home directory layout if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created.
    pub fn ensure_layout(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.root)?;
        std::fs::create_dir_all(self.modules_dir())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths() {
        let home = VitrineHome::at("/tmp/vitrine-test");
        assert_eq!(home.config_path(), PathBuf::from("/tmp/vitrine-test/config.toml"));
        assert_eq!(home.modules_dir(), PathBuf::from("/tmp/vitrine-test/modules"));
    }

    #[test]
    fn test_ensure_layout() {
        let temp = TempDir::new().unwrap();
        let home = VitrineHome::at(temp.path().join("home"));
        home.ensure_layout().unwrap();
        assert!(home.root().is_dir());
        assert!(home.modules_dir().is_dir());
    }
}
