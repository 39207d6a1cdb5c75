//! Error types for manifold-test

use thiserror::Error;

/// Errors that can occur in the test support crate
#[derive(Debug, Error)]
pub enum TestError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] manifold_core::Error),

    /// Invalid generator parameters
    #[error("invalid generator parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for test support operations
pub type TestResult<T> = Result<T, TestError>;
