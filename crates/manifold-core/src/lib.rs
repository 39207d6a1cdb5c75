//! manifold-core - Buffer primitives for the adaptive manifold filter
//!
//! This crate provides the data types the filter pipeline is built on:
//!
//! - [`FImg`]: single-channel `f32` image with elementwise arithmetic
//! - [`Mask`]: single-channel boolean image for active pixel sets
//! - [`Image`]: multi-channel boundary type (8-bit, 16-bit or `f32` samples)
//!
//! All fallible operations return [`Result`] with the crate [`Error`] type.

mod error;
mod fimg;
mod image;
mod mask;

pub use error::{Error, Result};
pub use fimg::FImg;
pub use image::{Image, ImageDepth};
pub use mask::Mask;
