//! The module contract: descriptor data plus the runtime trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use vitrine_core::{CssValue, HostWindow, Platform, PlatformSelector};

/// Unique identifier of a module.
///
/// Uniqueness is enforced by the controller's registry, not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleId(String);

impl ModuleId {
    /// Wrap an identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ModuleId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Static, self-declared facts about a module variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    /// Unique module identifier.
    pub id: ModuleId,
    /// Core modules cannot be disabled or unloaded.
    pub core: bool,
    /// Enabled flag used when the config has no entry yet.
    pub default_on: bool,
    /// Platforms the module may load on.
    pub platforms: PlatformSelector,
    /// CSS custom properties the module observes, in dispatch order.
    /// Modules with an empty list never receive `update` calls.
    pub css_props: Vec<String>,
}

impl ModuleDescriptor {
    /// Whether the module may load on `platform`.
    #[must_use]
    pub fn is_applicable(&self, platform: Platform) -> bool {
        self.platforms.matches(platform)
    }
}

/// A live feature module.
///
/// `update` applies a platform effect and has no return contract beyond
/// completion; the lifecycle hooks fire on window creation, window close,
/// and module removal.
#[async_trait]
pub trait Module: Send + Sync {
    /// The module's static descriptor.
    fn descriptor(&self) -> &ModuleDescriptor;

    /// React to a freshly read value of one observed property.
    async fn update(&self, window: &dyn HostWindow, property: &str, value: Option<CssValue>);

    /// A host window was created.
    async fn window_init(&self, window: &dyn HostWindow);

    /// A host window is closing.
    async fn window_close(&self, window: &dyn HostWindow);

    /// The module is being removed from the registry.
    async fn unload(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_applicability() {
        let descriptor = ModuleDescriptor {
            id: ModuleId::new("linux-blur"),
            core: true,
            default_on: true,
            platforms: PlatformSelector::only(Platform::Linux),
            css_props: vec!["--vitrine-linux-blur".to_string()],
        };

        assert!(descriptor.is_applicable(Platform::Linux));
        assert!(!descriptor.is_applicable(Platform::Windows));
    }

    #[test]
    fn test_module_id_display() {
        assert_eq!(ModuleId::new("linux-blur").to_string(), "linux-blur");
    }
}
