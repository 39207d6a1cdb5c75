//! Horizontal-vertical recursive exponential blur
//!
//! The atomic smoothing primitive of the pipeline: a causal/anti-causal
//! first-order recursive filter with feedback coefficient
//! `a = exp(-sqrt(2)/sigma)`, applied along every row and then along every
//! column. It approximates a Gaussian of standard deviation `sigma` in two
//! sweeps per axis and runs in O(pixels) regardless of `sigma`.
//!
//! The manifold filter uses it to build the root guide signal and to
//! propagate guides to child tree nodes.

use manifold_core::FImg;

/// Apply the recursive exponential blur with the given spatial sigma
///
/// Rows are filtered left-to-right then right-to-left; the row-filtered
/// result is then filtered top-to-bottom and bottom-to-top in place.
/// Single-row or single-column images degenerate gracefully (the pass
/// along a length-1 axis is the identity).
pub fn h_filter(src: &FImg, sigma: f32) -> FImg {
    debug_assert!(sigma > 0.0);

    let a = (-std::f32::consts::SQRT_2 / sigma).exp();
    let (width, height) = src.dimensions();
    let w = width as usize;
    let h = height as usize;

    let mut dst = src.clone();

    // Row passes. The causal sweep reads the already-updated left
    // neighbor, so working in place over the copied source is exact.
    for y in 0..height {
        let row = dst.row_mut(y);
        for x in 1..w {
            row[x] += a * (row[x - 1] - row[x]);
        }
        for x in (0..w - 1).rev() {
            row[x] += a * (row[x + 1] - row[x]);
        }
    }

    // Column passes, expressed as whole-row updates against the previous
    // row so the inner loop stays contiguous.
    let data = dst.data_mut();
    for y in 1..h {
        let (prev_rows, cur_rows) = data.split_at_mut(y * w);
        let prev = &prev_rows[(y - 1) * w..];
        let cur = &mut cur_rows[..w];
        for x in 0..w {
            cur[x] += a * (prev[x] - cur[x]);
        }
    }
    for y in (0..h - 1).rev() {
        let (cur_rows, next_rows) = data.split_at_mut((y + 1) * w);
        let cur = &mut cur_rows[y * w..];
        let next = &next_rows[..w];
        for x in 0..w {
            cur[x] += a * (next[x] - cur[x]);
        }
    }

    dst
}
