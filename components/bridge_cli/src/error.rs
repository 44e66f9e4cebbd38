//! Error types for the CLI

use script_context::BridgeError;
use thiserror::Error;

/// CLI-specific errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Failure reported by the call bridge
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    /// Output could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed invocation text
    #[error("usage error: {0}")]
    Usage(String),

    /// REPL error
    #[error("REPL error: {0}")]
    Repl(String),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
