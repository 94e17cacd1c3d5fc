//! Tool execution errors.

use thiserror::Error;

use crate::domains::search::SearchError;

/// Errors produced by tool handlers.
///
/// These surface to clients as handler-failure responses; the dispatcher
/// maps them onto the wire error envelope.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Arguments passed schema validation but are unusable by the handler.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// The handler ran and failed.
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// An external command or request exceeded its deadline.
    #[error("operation timed out after {0}s")]
    Timeout(u64),

    /// Search backend failure.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ToolError {
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::InvalidArguments(message.into())
    }

    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::ExecutionFailed(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}
