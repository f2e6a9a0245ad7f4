//! Vitrine Modules - the feature module contract and the builtin set.
//!
//! A module is a pluggable feature unit: it declares which platforms it may
//! load on, whether it is core (cannot be disabled or unloaded), its default
//! enabled state, and the CSS custom properties it observes. The controller
//! reads those properties per window and dispatches the values here.
//!
//! Builtin modules self-declare through a static manifest consumed by the
//! controller's discovery pass; there is no runtime type introspection.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod blur;
mod manifest;
mod module;
mod source;

pub use blur::LinuxBlurModule;
pub use manifest::{BuiltinModule, builtin_manifest, find_builtin};
pub use module::{Module, ModuleDescriptor, ModuleId};
pub use source::{MODULE_EXTENSIONS, ModuleSource, resolve_source};
