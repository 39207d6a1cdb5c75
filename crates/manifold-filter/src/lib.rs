//! manifold-filter - Adaptive manifold edge-preserving filtering
//!
//! This crate provides the adaptive manifold filter and its building
//! blocks:
//!
//! - Adaptive manifold filtering (edge-preserving smoothing over a tree
//!   of locally-linear manifold approximations)
//! - Domain transform recursive filtering (edge-aware blur guided by a
//!   multi-channel signal)
//! - Separable first-order recursive blur
//! - Masked principal direction estimation by power iteration

pub mod domain_transform;
mod error;
pub mod manifold;
pub mod pca;
pub mod recursive;

pub use error::{FilterError, FilterResult};

// Re-export commonly used items
pub use domain_transform::DomainTransformFilter;
pub use manifold::{AmFilterParams, adaptive_manifold_filter, am_filter};
pub use pca::principal_direction;
pub use recursive::h_filter;
