//! Synthetic test images
//!
//! The regression tests work on generated rasters with known structure
//! instead of image files: constant fields (fixed-point checks), step
//! edges (edge preservation), smooth ramps (resampling error bounds) and
//! seeded uniform noise (smoothing strength).

use crate::error::{TestError, TestResult};
use manifold_core::{FImg, Image, ImageDepth};
use rand::{RngExt, SeedableRng, rngs::StdRng};

/// Generate a constant single-channel 8-bit image
pub fn constant_u8(width: u32, height: u32, value: u8) -> TestResult<Image> {
    let data = vec![value; (width as usize) * (height as usize)];
    Ok(Image::from_u8(width, height, 1, data)?)
}

/// Generate a constant three-channel 8-bit image
pub fn constant_rgb_u8(width: u32, height: u32, rgb: [u8; 3]) -> TestResult<Image> {
    let mut data = Vec::with_capacity((width as usize) * (height as usize) * 3);
    for _ in 0..(width as usize) * (height as usize) {
        data.extend_from_slice(&rgb);
    }
    Ok(Image::from_u8(width, height, 3, data)?)
}

/// Generate a two-tone vertical step edge
///
/// Columns `x < edge_x` get `left`, the rest get `right`.
pub fn vertical_step_u8(
    width: u32,
    height: u32,
    edge_x: u32,
    left: u8,
    right: u8,
) -> TestResult<Image> {
    if edge_x >= width {
        return Err(TestError::InvalidParameters(format!(
            "edge_x {} out of range for width {}",
            edge_x, width
        )));
    }

    let mut data = Vec::with_capacity((width as usize) * (height as usize));
    for _ in 0..height {
        for x in 0..width {
            data.push(if x < edge_x { left } else { right });
        }
    }
    Ok(Image::from_u8(width, height, 1, data)?)
}

/// Generate a smooth horizontal ramp in [0, 1] as an f32 field
pub fn smooth_ramp(width: u32, height: u32) -> TestResult<FImg> {
    let mut img = FImg::new(width, height)?;
    for y in 0..height {
        for x in 0..width {
            img.set_pixel_unchecked(x, y, x as f32 / width.max(2) as f32);
        }
    }
    Ok(img)
}

/// Generate a single-channel 8-bit image of uniform noise around a base level
///
/// Values are `base ± amplitude`, clamped to [0, 255], drawn from a seeded
/// RNG so runs are reproducible.
pub fn noisy_flat_u8(
    width: u32,
    height: u32,
    base: u8,
    amplitude: u8,
    seed: u64,
) -> TestResult<Image> {
    let mut rng = StdRng::seed_from_u64(seed);
    let amp = amplitude as i32;

    let mut data = Vec::with_capacity((width as usize) * (height as usize));
    for _ in 0..(width as usize) * (height as usize) {
        let v = base as i32 + rng.random_range(-amp..=amp);
        data.push(v.clamp(0, 255) as u8);
    }
    Ok(Image::from_u8(width, height, 1, data)?)
}

/// Mean absolute difference between two images, over all channels
///
/// # Panics
///
/// Panics in debug builds if the images disagree in geometry; intended for
/// test assertions only.
pub fn mean_abs_diff(a: &Image, b: &Image) -> f64 {
    debug_assert_eq!(a.dimensions(), b.dimensions());
    debug_assert_eq!(a.channels(), b.channels());

    let mut sum = 0.0f64;
    let mut n = 0u64;
    for y in 0..a.height() {
        for x in 0..a.width() {
            for c in 0..a.channels() {
                let va = a.get_sample(x, y, c).unwrap();
                let vb = b.get_sample(x, y, c).unwrap();
                sum += (va - vb).abs() as f64;
                n += 1;
            }
        }
    }
    sum / n as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_u8() {
        let img = constant_u8(8, 6, 42).unwrap();
        assert_eq!(img.dimensions(), (8, 6));
        assert_eq!(img.channels(), 1);
        assert_eq!(img.get_sample(7, 5, 0).unwrap(), 42.0);
    }

    #[test]
    fn test_vertical_step() {
        let img = vertical_step_u8(10, 4, 5, 50, 200).unwrap();
        assert_eq!(img.get_sample(4, 0, 0).unwrap(), 50.0);
        assert_eq!(img.get_sample(5, 0, 0).unwrap(), 200.0);

        assert!(vertical_step_u8(10, 4, 10, 50, 200).is_err());
    }

    #[test]
    fn test_smooth_ramp_monotone() {
        let img = smooth_ramp(32, 4).unwrap();
        for x in 1..32 {
            assert!(img.get_pixel_unchecked(x, 0) > img.get_pixel_unchecked(x - 1, 0));
        }
    }

    #[test]
    fn test_noisy_flat_reproducible() {
        let a = noisy_flat_u8(16, 16, 128, 20, 7).unwrap();
        let b = noisy_flat_u8(16, 16, 128, 20, 7).unwrap();
        assert_eq!(a, b);

        let c = noisy_flat_u8(16, 16, 128, 20, 8).unwrap();
        assert!(mean_abs_diff(&a, &c) > 0.0);
    }
}
