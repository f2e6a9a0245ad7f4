//! Capability traits for the host desktop shell.
//!
//! Vitrine runs inside a third-party chat client and never owns windows,
//! renderers, or compositors itself. Everything it needs from the host is
//! expressed here as a small capability surface:
//!
//! - [`HostWindow`]: a native window plus handles to its renderer context
//!   and its per-window effect driver
//! - [`RendererContext`]: a message-passing round-trip into the isolated
//!   script environment of one window
//! - [`EffectDriver`]: the opaque native component that performs the actual
//!   blur, with capability-gated tuning fields
//! - [`HostShell`]: enumeration of every live renderer context
//!
//! Renderer execution is a fixed set of named remote operations
//! ([`RemoteRequest`]) sent as structured messages, not serialized code, so
//! there is no closure-capture restriction anywhere in this design.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by host capability calls.
#[derive(Debug, Error)]
pub enum HostError {
    /// The renderer context is gone (window destroyed mid-call).
    #[error("renderer context is gone")]
    ContextGone,

    /// The remote operation ran but failed inside the renderer.
    #[error("renderer execution failed: {0}")]
    ExecutionFailed(String),

    /// The native effect driver reported a failure.
    #[error("effect driver failed: {0}")]
    DriverFailed(String),
}

/// Result type for host capability calls.
pub type HostResult<T> = Result<T, HostError>;

/// Opaque identifier of a host window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window-{}", self.0)
    }
}

/// Console log level inside a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// `console.log`.
    #[default]
    Log,
    /// `console.warn`.
    Warn,
    /// `console.error`.
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Log => write!(f, "log"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A named remote operation executed inside a renderer context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "op")]
pub enum RemoteRequest {
    /// Read a computed CSS custom property from the document root.
    ReadCssProperty {
        /// The property name, e.g. `--vitrine-linux-blur`.
        name: String,
    },
    /// Emit a styled message on the renderer's console.
    Log {
        /// Console method to use.
        level: LogLevel,
        /// Pre-formatted console arguments (`%c` format string followed by
        /// its style strings).
        segments: Vec<String>,
    },
}

/// A message-passing round-trip into one window's script environment.
///
/// Implementations deliver the request over the host shell's existing
/// messaging channel and resolve with whatever the remote operation
/// returned (`Value::Null` when it returned nothing). The call fails when
/// the context has been destroyed or the operation threw.
#[async_trait]
pub trait RendererContext: Send + Sync {
    /// Execute one remote operation and return its result.
    async fn execute(&self, request: RemoteRequest) -> HostResult<serde_json::Value>;
}

/// A tunable numeric field the native effect driver may expose.
///
/// Not every driver build carries every field; callers must check
/// [`EffectDriver::supports`] first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectField {
    /// Gaussian blur sigma (GNOME-style compositors).
    BlurSigma,
    /// Corner radius of the blurred region.
    CornerRadius,
}

impl fmt::Display for EffectField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlurSigma => write!(f, "blur_sigma"),
            Self::CornerRadius => write!(f, "corner_radius"),
        }
    }
}

/// The native, platform-specific component that performs the visual effect.
///
/// Setting a field the driver does not support is a no-op, never an error.
#[async_trait]
pub trait EffectDriver: Send + Sync {
    /// Toggle the blur effect.
    async fn set_blur(&self, enabled: bool) -> HostResult<()>;

    /// Whether this driver build exposes `field`.
    fn supports(&self, field: EffectField) -> bool;

    /// Set a tuning field. Implementations may assume the caller checked
    /// [`Self::supports`]; a call for an unsupported field must still be a
    /// harmless no-op.
    async fn set_field(&self, field: EffectField, value: i64) -> HostResult<()>;
}

/// One native window of the host client.
pub trait HostWindow: Send + Sync {
    /// The window's identifier.
    fn id(&self) -> WindowId;

    /// The window's renderer context.
    fn renderer(&self) -> Arc<dyn RendererContext>;

    /// The window's effect driver.
    fn effects(&self) -> Arc<dyn EffectDriver>;
}

/// The host shell as a whole.
pub trait HostShell: Send + Sync {
    /// Every live renderer context, for global log fan-out.
    fn renderer_contexts(&self) -> Vec<Arc<dyn RendererContext>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_request_wire_format() {
        let request = RemoteRequest::ReadCssProperty {
            name: "--vitrine-linux-blur".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["op"], "read_css_property");
        assert_eq!(json["name"], "--vitrine-linux-blur");
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevel::Log.to_string(), "log");
        assert_eq!(LogLevel::Warn.to_string(), "warn");
        assert_eq!(LogLevel::Error.to_string(), "error");
    }

    #[test]
    fn test_window_id_display() {
        assert_eq!(WindowId(3).to_string(), "window-3");
    }
}
