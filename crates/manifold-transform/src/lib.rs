//! manifold-transform - Resampling for the adaptive manifold filter
//!
//! This crate provides the resampling primitive used by the filter's
//! multi-resolution scheduler:
//!
//! - Bilinear resize with pixel-center mapping ([`resize_linear`])
//! - Componentwise resize of channel stacks ([`resize_linear_all`])

mod error;
pub mod scale;

pub use error::{TransformError, TransformResult};
pub use scale::{resize_linear, resize_linear_all};
