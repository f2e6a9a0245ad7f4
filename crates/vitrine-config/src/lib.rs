//! Vitrine Config - the settings document for the module loader.
//!
//! One TOML file holds a `[modules]` table mapping module identifiers to
//! their enabled flags. It is loaded once at startup and saved synchronously
//! after each load decision, so the on-disk state always reflects the last
//! decision the controller made.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

mod store;

pub use store::{ConfigError, ConfigResult, ConfigStore, Settings};
