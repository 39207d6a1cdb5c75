//! Error types for manifold-transform

use thiserror::Error;

/// Errors that can occur during resampling operations
#[derive(Debug, Error)]
pub enum TransformError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] manifold_core::Error),

    /// Invalid target size
    #[error("invalid target size: {0}x{1}")]
    InvalidTargetSize(u32, u32),
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
