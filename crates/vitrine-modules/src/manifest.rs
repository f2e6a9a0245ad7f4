//! Static registration of builtin modules.
//!
//! Each builtin self-declares its descriptor and a constructor; discovery
//! walks this list instead of inspecting types at runtime.

use std::sync::Arc;

use crate::blur::LinuxBlurModule;
use crate::module::{Module, ModuleDescriptor};

/// One entry of the builtin manifest.
#[derive(Clone, Copy)]
pub struct BuiltinModule {
    /// The variant's static descriptor.
    pub descriptor: fn() -> &'static ModuleDescriptor,
    /// Constructor for a live instance.
    pub construct: fn() -> Arc<dyn Module>,
}

impl std::fmt::Debug for BuiltinModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuiltinModule")
            .field("id", &(self.descriptor)().id)
            .finish_non_exhaustive()
    }
}

/// The bundled module set.
#[must_use]
pub fn builtin_manifest() -> &'static [BuiltinModule] {
    const MANIFEST: &[BuiltinModule] = &[BuiltinModule {
        descriptor: LinuxBlurModule::descriptor_static,
        construct: || Arc::new(LinuxBlurModule::new()),
    }];
    MANIFEST
}

/// Find a manifest entry whose identifier matches a file stem.
#[must_use]
pub fn find_builtin<'a>(manifest: &'a [BuiltinModule], stem: &str) -> Option<&'a BuiltinModule> {
    manifest
        .iter()
        .find(|entry| (entry.descriptor)().id.as_str() == stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_manifest_has_blur() {
        let manifest = builtin_manifest();
        assert!(find_builtin(manifest, "linux-blur").is_some());
        assert!(find_builtin(manifest, "nonexistent").is_none());
    }

    #[test]
    fn test_constructor_yields_matching_descriptor() {
        let entry = find_builtin(builtin_manifest(), "linux-blur").unwrap();
        let module = (entry.construct)();
        assert_eq!(module.descriptor().id.as_str(), "linux-blur");
        assert!(module.descriptor().core);
    }
}
