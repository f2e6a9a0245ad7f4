//! Vitrine Bridge - structured round-trips into a host renderer context.
//!
//! The bridge is how the controller reaches inside a window: it sends a
//! fixed set of named remote operations (read a computed CSS property, log
//! a styled message) over the host's messaging channel, bounds every
//! round-trip with a timeout, and normalizes what comes back. Nothing here
//! serializes code; a dead renderer turns into an error the caller can
//! ignore, never a crash.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

mod bridge;
mod format;

pub use bridge::{BridgeError, BridgeResult, DEFAULT_TIMEOUT, RendererBridge};
pub use format::{LogChannel, format_log_message};
