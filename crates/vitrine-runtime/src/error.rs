//! Controller error types.

use thiserror::Error;

use vitrine_config::ConfigError;

/// Errors that abort controller construction or a persistence step.
///
/// Expected per-module failures (wrong platform, disabled, duplicate) are
/// not errors; they are reported as outcome variants so a rejected load can
/// never be mistaken for success.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The settings document could not be loaded or saved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The home directory layout could not be prepared.
    #[error("failed to prepare vitrine home: {0}")]
    Home(#[from] std::io::Error),
}

/// Result type for controller operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
