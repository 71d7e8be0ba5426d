//! Error types for executor operations.

use thiserror::Error;

/// Errors produced by a run of the executor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RunError {
    /// The number of failed tasks reached the configured error limit.
    #[error("errors limit exceeded")]
    ErrorsLimitExceeded,
    /// Configuration validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Internal failure (thread spawn, worker panic, runtime join).
    #[error("internal error: {0}")]
    Internal(String),
}

impl RunError {
    /// Whether this error is the error-threshold abort rather than a setup failure.
    #[must_use]
    pub const fn is_limit_exceeded(&self) -> bool {
        matches!(self, Self::ErrorsLimitExceeded)
    }
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
