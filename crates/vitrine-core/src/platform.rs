//! Platform identification and module applicability.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A desktop platform the host client may run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// Linux (X11 or Wayland).
    Linux,
    /// macOS.
    MacOs,
    /// Windows.
    Windows,
}

impl Platform {
    /// Detect the platform the current process is running on.
    #[must_use]
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else {
            Self::Linux
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::MacOs => write!(f, "macos"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

/// Which platforms a module may load on.
///
/// This is the data form of a module's applicability predicate: either a
/// wildcard or an explicit allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformSelector {
    /// Applicable everywhere.
    Any,
    /// Applicable only on the listed platforms.
    Only(Vec<Platform>),
}

impl PlatformSelector {
    /// Create a selector for a single platform.
    #[must_use]
    pub fn only(platform: Platform) -> Self {
        Self::Only(vec![platform])
    }

    /// Whether a module with this selector may load on `platform`.
    #[must_use]
    pub fn matches(&self, platform: Platform) -> bool {
        match self {
            Self::Any => true,
            Self::Only(platforms) => platforms.contains(&platform),
        }
    }
}

impl Default for PlatformSelector {
    fn default() -> Self {
        Self::Any
    }
}
