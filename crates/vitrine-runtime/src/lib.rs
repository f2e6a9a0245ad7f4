//! Vitrine Runtime - the application controller.
//!
//! The controller is the orchestrator of the whole loader: it owns the
//! module registry and the settings document, discovers builtin and
//! external modules at startup, gates them on platform applicability and
//! config flags, and wires host window events to module updates through
//! the renderer bridge.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

mod controller;
mod error;
mod events;

pub use controller::{Controller, LoadOutcome, RefreshReport, UnloadOutcome};
pub use error::{RuntimeError, RuntimeResult};
pub use events::HostEvent;
