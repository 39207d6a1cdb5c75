//! Regression test for the filtering primitives
//!
//! Cross-checks the building blocks against each other on synthetic
//! rasters: the recursive blur against its normalization and smoothing
//! properties, the domain transform against its edge-stopping behavior,
//! and the principal direction estimate against a known dominant axis.

use manifold_core::{FImg, Mask};
use manifold_filter::{DomainTransformFilter, h_filter, principal_direction};
use manifold_test::{RegParams, smooth_ramp};

/// The recursive blur preserves constants exactly, keeps values inside
/// the input range, and actually spreads an impulse.
#[test]
fn primitives_reg_h_filter() {
    let mut rp = RegParams::new("h_filter");

    let flat = FImg::new_with_value(24, 16, 3.25).unwrap();
    let blurred = h_filter(&flat, 8.0);
    rp.compare_fimg(&flat, &blurred, 0.0);

    let mut impulse = FImg::new(33, 33).unwrap();
    impulse.set_pixel(16, 16, 1.0).unwrap();
    let blurred = h_filter(&impulse, 6.0);

    let center = blurred.get_pixel(16, 16).unwrap();
    let near = blurred.get_pixel(20, 16).unwrap();
    let far = blurred.get_pixel(32, 16).unwrap();
    rp.compare_bool(center < 1.0, "impulse amplitude reduced");
    rp.compare_bool(near > 0.0, "energy spread to neighbors");
    rp.compare_bool(center > near && near > far, "monotone falloff");

    let ramp = smooth_ramp(32, 32).unwrap();
    let blurred = h_filter(&ramp, 4.0);
    let (min_in, max_in) = (ramp.min_value().unwrap(), ramp.max_value().unwrap());
    let min_out = blurred.min_value().unwrap();
    let max_out = blurred.max_value().unwrap();
    rp.compare_bool(min_out >= min_in - 1e-4, "no undershoot");
    rp.compare_bool(max_out <= max_in + 1e-4, "no overshoot");

    assert!(rp.cleanup(), "h_filter regression test failed");
}

/// The domain transform blurs freely over flat guides but stops at a
/// guide discontinuity.
#[test]
fn primitives_reg_domain_transform_edge_stop() {
    let mut rp = RegParams::new("dt_edge_stop");

    let (w, h) = (40u32, 20u32);

    // Guide: hard step at x = 20. Signal: impulse left of the step.
    let mut guide = FImg::new(w, h).unwrap();
    for y in 0..h {
        for x in 20..w {
            guide.set_pixel(x, y, 1.0).unwrap();
        }
    }
    let mut signal = FImg::new(w, h).unwrap();
    signal.set_pixel(10, 10, 1.0).unwrap();

    let dtf = DomainTransformFilter::new(std::slice::from_ref(&guide), 8.0, 0.05, 3).unwrap();
    let out = dtf.filter(&signal).unwrap();

    let same_side = out.get_pixel(16, 10).unwrap();
    let across = out.get_pixel(24, 10).unwrap();
    rp.compare_bool(same_side > 0.0, "diffusion on the impulse side");
    rp.compare_bool(
        across < 0.01 * same_side,
        "diffusion blocked at the guide edge",
    );

    // With a flat guide the same filter spreads across the whole row.
    let flat_guide = FImg::new(w, h).unwrap();
    let dtf = DomainTransformFilter::new(std::slice::from_ref(&flat_guide), 8.0, 0.05, 3).unwrap();
    let out = dtf.filter(&signal).unwrap();
    rp.compare_bool(
        out.get_pixel(24, 10).unwrap() > 0.0,
        "flat guide diffuses across",
    );

    assert!(rp.cleanup(), "dt_edge_stop regression test failed");
}

/// Power iteration on a two-channel field whose variance lies almost
/// entirely along one axis must recover that axis.
#[test]
fn primitives_reg_principal_direction() {
    let mut rp = RegParams::new("principal_direction");

    let (w, h) = (16u32, 16u32);
    let mut chan_a = FImg::new(w, h).unwrap();
    let mut chan_b = FImg::new(w, h).unwrap();
    for y in 0..h {
        for x in 0..w {
            // Dominant variation along (1, 0.1), plus a tiny orthogonal wobble.
            let t = (x as f32 - 8.0) / 8.0;
            let o = if (x + y) % 2 == 0 { 0.01 } else { -0.01 };
            chan_a.set_pixel(x, y, t + o * 0.1).unwrap();
            chan_b.set_pixel(x, y, 0.1 * t - o).unwrap();
        }
    }

    let mask = Mask::filled(w, h).unwrap();
    let eigen = principal_direction(&[chan_a, chan_b], &mask, &[0.5, -0.5], 10).unwrap();

    let norm = (eigen[0] * eigen[0] + eigen[1] * eigen[1]).sqrt();
    rp.compare_values(1.0, norm as f64, 1e-4);

    // Alignment with the dominant axis (sign-insensitive).
    let axis_norm = (1.0f32 + 0.01).sqrt();
    let dot = (eigen[0] + 0.1 * eigen[1]).abs() / axis_norm;
    rp.compare_bool(dot > 0.99, "aligned with dominant axis");

    assert!(rp.cleanup(), "principal_direction regression test failed");
}
