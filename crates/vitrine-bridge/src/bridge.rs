//! Timeout-bounded remote operations against one renderer context.

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::trace;

use vitrine_core::{CssValue, HostError, LogLevel, RemoteRequest, RendererContext};

use crate::format::{LogChannel, format_log_message};

/// Default bound on one renderer round-trip.
///
/// An unresponsive renderer must not stall a refresh cycle indefinitely;
/// a timeout is a recoverable per-call failure.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Errors from a bridge round-trip.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The renderer context was destroyed.
    #[error("renderer context is gone")]
    ContextGone,

    /// The remote operation failed inside the renderer.
    #[error("remote operation failed: {0}")]
    ExecutionFailed(String),

    /// The renderer did not answer within the bound.
    #[error("renderer round-trip timed out after {0:?}")]
    Timeout(Duration),
}

impl From<HostError> for BridgeError {
    fn from(err: HostError) -> Self {
        match err {
            HostError::ContextGone => Self::ContextGone,
            HostError::ExecutionFailed(message) | HostError::DriverFailed(message) => {
                Self::ExecutionFailed(message)
            }
        }
    }
}

/// Result type for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;

/// A handle for talking to one window's renderer.
#[derive(Clone)]
pub struct RendererBridge {
    context: Arc<dyn RendererContext>,
    timeout: Duration,
}

impl RendererBridge {
    /// Wrap a renderer context with the default round-trip bound.
    #[must_use]
    pub fn new(context: Arc<dyn RendererContext>) -> Self {
        Self {
            context,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the round-trip bound.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read a computed CSS custom property from the window's document root.
    ///
    /// The raw result is trimmed and stripped of stray double quotes; an
    /// empty or absent result becomes `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the context is gone, the lookup threw, or the
    /// round-trip timed out.
    pub async fn read_css_property(&self, name: &str) -> BridgeResult<Option<CssValue>> {
        let value = self
            .execute(RemoteRequest::ReadCssProperty {
                name: name.to_string(),
            })
            .await?;

        let Some(raw) = value.as_str() else {
            return Ok(None);
        };

        let cleaned = raw.trim().replace('"', "");
        if cleaned.is_empty() {
            return Ok(None);
        }

        trace!(property = name, value = %cleaned, "Read CSS property");
        Ok(Some(CssValue::new(cleaned)))
    }

    /// Emit a `[Vitrine]`-prefixed message on the renderer's console.
    ///
    /// # Errors
    ///
    /// Returns an error if the context is gone or the round-trip timed out.
    /// Callers treat this as best-effort.
    pub async fn log(&self, level: LogLevel, message: &str) -> BridgeResult<()> {
        self.execute(RemoteRequest::Log {
            level,
            segments: format_log_message(message, LogChannel::DevTools),
        })
        .await?;
        Ok(())
    }

    async fn execute(&self, request: RemoteRequest) -> BridgeResult<serde_json::Value> {
        match tokio::time::timeout(self.timeout, self.context.execute(request)).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(BridgeError::Timeout(self.timeout)),
        }
    }
}

impl std::fmt::Debug for RendererBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RendererBridge")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
