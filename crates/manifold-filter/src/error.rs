//! Error types for manifold-filter

use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] manifold_core::Error),

    /// Resampling error
    #[error("transform error: {0}")]
    Transform(#[from] manifold_transform::TransformError),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Buffer dimension mismatch
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        /// Expected (width, height)
        expected: (u32, u32),
        /// Actual (width, height)
        actual: (u32, u32),
    },
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
