//! manifold-test - Regression test support
//!
//! This crate provides the shared pieces of the workspace's regression
//! tests:
//!
//! - [`RegParams`]: indexed value/image comparisons with failure
//!   collection and a final `cleanup()` verdict
//! - Synthetic test image generators ([`images`])
//!
//! # Usage
//!
//! ```ignore
//! use manifold_test::RegParams;
//!
//! let mut rp = RegParams::new("manifold");
//! rp.compare_values(1.0, result, 1e-6);
//! assert!(rp.cleanup());
//! ```

mod error;
pub mod images;
mod params;

pub use error::{TestError, TestResult};
pub use images::{
    constant_rgb_u8, constant_u8, mean_abs_diff, noisy_flat_u8, smooth_ramp, vertical_step_u8,
};
pub use params::RegParams;
