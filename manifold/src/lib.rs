//! Manifold - Adaptive manifold image filtering for Rust
//!
//! Edge-preserving smoothing of images of any channel count via adaptive
//! manifolds (Gastal & Oliveira, SIGGRAPH 2012).
//!
//! # Overview
//!
//! The library is split into focused crates, all re-exported here:
//!
//! - Image containers: packed multi-channel images and planar float
//!   channels
//! - Geometric resampling (bilinear resizing)
//! - Filtering: the adaptive manifold filter, domain transform recursive
//!   filtering, separable recursive blur, and masked power-iteration PCA
//!
//! # Example
//!
//! ```
//! use manifold::{Image, filter::{AmFilterParams, adaptive_manifold_filter}};
//!
//! // A small grayscale ramp
//! let data: Vec<u8> = (0..64 * 64).map(|i| (i % 64) as u8 * 4).collect();
//! let img = Image::from_u8(64, 64, 1, data).unwrap();
//!
//! let params = AmFilterParams { sigma_s: 8.0, sigma_r: 0.3, ..Default::default() };
//! let smoothed = adaptive_manifold_filter(&img, None, &params).unwrap();
//! assert_eq!(smoothed.dimensions(), img.dimensions());
//! ```

// Re-export core types (primary data structures used everywhere)
pub use manifold_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use manifold_filter as filter;
pub use manifold_transform as transform;
