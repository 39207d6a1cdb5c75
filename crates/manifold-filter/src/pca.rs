//! Principal direction estimation over a masked pixel set
//!
//! Power iteration for the dominant eigenvector of the covariance of
//! per-pixel residual vectors, restricted to the pixels of an active mask.
//! The residual "matrix" is kept in its natural planar form: one channel
//! buffer per component, one row per pixel implicitly.

use crate::error::{FilterError, FilterResult};
use manifold_core::{FImg, Mask};

/// Estimate the dominant direction of masked residual vectors
///
/// Runs `num_iters` rounds of power iteration starting from `init`: each
/// round projects every masked pixel's residual onto the current estimate
/// and accumulates the residuals scaled by their projections into the next
/// estimate. No normalization happens between rounds; the final vector is
/// normalized to unit length.
///
/// If the accumulated vector is exactly zero (all-zero mask or residual),
/// the all-zero vector is returned as-is. Callers keep masks non-empty by
/// construction, so this is a degenerate case rather than an expected
/// outcome.
///
/// # Arguments
/// * `residual` - One buffer per channel, all the same size as `mask`
/// * `mask` - Active pixel set
/// * `init` - Starting vector, one entry per channel
/// * `num_iters` - Number of power iterations (must be >= 1)
///
/// # Errors
///
/// Returns `FilterError::InvalidParameters` for an empty channel list, an
/// init length mismatch or zero iterations, and a size error if a channel
/// doesn't match the mask.
pub fn principal_direction(
    residual: &[FImg],
    mask: &Mask,
    init: &[f32],
    num_iters: u32,
) -> FilterResult<Vec<f32>> {
    if residual.is_empty() {
        return Err(FilterError::InvalidParameters(
            "residual must have at least one channel".to_string(),
        ));
    }
    if residual.len() != init.len() {
        return Err(FilterError::InvalidParameters(format!(
            "init length {} doesn't match channel count {}",
            init.len(),
            residual.len()
        )));
    }
    if num_iters == 0 {
        return Err(FilterError::InvalidParameters(
            "num_iters must be at least 1".to_string(),
        ));
    }
    for chan in residual {
        if chan.dimensions() != mask.dimensions() {
            return Err(FilterError::DimensionMismatch {
                expected: mask.dimensions(),
                actual: chan.dimensions(),
            });
        }
    }

    let cn = residual.len();
    let n = mask.data().len();
    let mask_data = mask.data();
    let channels: Vec<&[f32]> = residual.iter().map(|c| c.data()).collect();

    let mut vec = init.to_vec();
    let mut next = vec![0.0f32; cn];

    for _ in 0..num_iters {
        next.fill(0.0);

        for i in 0..n {
            if !mask_data[i] {
                continue;
            }

            let mut dots = 0.0f32;
            for c in 0..cn {
                dots += vec[c] * channels[c][i];
            }
            for c in 0..cn {
                next[c] += dots * channels[c][i];
            }
        }

        vec.copy_from_slice(&next);
    }

    let norm = vec.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for v in &mut vec {
            *v /= norm;
        }
    }

    Ok(vec)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_norm(v: &[f32]) -> f32 {
        v.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    #[test]
    fn test_invalid_parameters() {
        let mask = Mask::filled(4, 4).unwrap();
        let chan = FImg::new(4, 4).unwrap();

        assert!(principal_direction(&[], &mask, &[], 1).is_err());
        assert!(principal_direction(std::slice::from_ref(&chan), &mask, &[0.5, 0.5], 1).is_err());
        assert!(principal_direction(std::slice::from_ref(&chan), &mask, &[0.5], 0).is_err());

        let small = FImg::new(2, 2).unwrap();
        assert!(principal_direction(&[small], &mask, &[0.5], 1).is_err());
    }

    #[test]
    fn test_dominant_axis_recovered() {
        // Residuals vary strongly along channel 0 and barely along
        // channel 1: the dominant direction must be close to (±1, 0).
        let mut c0 = FImg::new(8, 8).unwrap();
        let mut c1 = FImg::new(8, 8).unwrap();
        for y in 0..8 {
            for x in 0..8 {
                let s = if (x + y) % 2 == 0 { 1.0 } else { -1.0 };
                c0.set_pixel_unchecked(x, y, 2.0 * s);
                c1.set_pixel_unchecked(x, y, 0.05 * s * if x % 2 == 0 { 1.0 } else { -1.0 });
            }
        }
        let mask = Mask::filled(8, 8).unwrap();

        let v = principal_direction(&[c0, c1], &mask, &[0.5, -0.5], 4).unwrap();
        assert!((unit_norm(&v) - 1.0).abs() < 1e-5);
        assert!(v[0].abs() > 0.99);
        assert!(v[1].abs() < 0.12);
    }

    #[test]
    fn test_unit_norm_with_partial_mask() {
        let mut chan = FImg::new(6, 6).unwrap();
        for y in 0..6 {
            for x in 0..6 {
                chan.set_pixel_unchecked(x, y, (x as f32) - 2.5);
            }
        }
        let mut mask = Mask::new(6, 6).unwrap();
        for y in 0..6 {
            mask.set(1, y, true);
            mask.set(4, y, true);
        }

        let v = principal_direction(&[chan], &mask, &[0.5], 2).unwrap();
        assert!((unit_norm(&v) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_masked_pixels_do_not_contribute() {
        // Identical residuals inside the mask; wild values outside must
        // not change the estimate.
        let mut a0 = FImg::new_with_value(4, 4, 1.0).unwrap();
        let mut a1 = FImg::new_with_value(4, 4, 0.0).unwrap();
        a0.set_pixel(3, 3, -100.0).unwrap();
        a1.set_pixel(3, 3, 100.0).unwrap();

        let mut mask = Mask::filled(4, 4).unwrap();
        mask.set(3, 3, false);

        let v = principal_direction(&[a0, a1], &mask, &[0.5, -0.5], 3).unwrap();
        assert!(v[0].abs() > 0.99);
        assert!(v[1].abs() < 1e-3);
    }

    #[test]
    fn test_empty_mask_gives_zero_vector() {
        let chan = FImg::new_with_value(4, 4, 1.0).unwrap();
        let mask = Mask::new(4, 4).unwrap();

        let v = principal_direction(&[chan], &mask, &[0.5], 1).unwrap();
        assert_eq!(v, vec![0.0]);
    }

    #[test]
    fn test_deterministic_for_fixed_init() {
        let mut chan = FImg::new(5, 5).unwrap();
        for y in 0..5 {
            for x in 0..5 {
                chan.set_pixel_unchecked(x, y, (x as f32 * 0.3 - y as f32 * 0.7).sin());
            }
        }
        let mask = Mask::filled(5, 5).unwrap();

        let v1 = principal_direction(std::slice::from_ref(&chan), &mask, &[0.5], 3).unwrap();
        let v2 = principal_direction(std::slice::from_ref(&chan), &mask, &[0.5], 3).unwrap();
        assert_eq!(v1, v2);
    }
}
