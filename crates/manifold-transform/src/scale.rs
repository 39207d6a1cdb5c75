//! Image scaling via bilinear interpolation
//!
//! The filter's multi-resolution scheduler maps every buffer between full
//! resolution and a fixed working resolution. Both directions use the same
//! primitive: [`resize_linear`], a bilinear resize with pixel-center
//! coordinate mapping (destination pixel centers are projected into the
//! source grid, and the four surrounding samples are blended).

use crate::error::{TransformError, TransformResult};
use manifold_core::FImg;

/// Resize an image to the given size with bilinear interpolation
///
/// Destination coordinates map to source coordinates through pixel
/// centers: `sx = (dx + 0.5) * w_src / w_dst - 0.5`, clamped to the source
/// rectangle, so corner pixels replicate at the borders. A target size
/// equal to the source size returns an identical copy.
///
/// # Arguments
/// * `src` - Input image
/// * `dst_width` - Target width (must be > 0)
/// * `dst_height` - Target height (must be > 0)
///
/// # Errors
///
/// Returns `TransformError::InvalidTargetSize` if either target dimension
/// is zero.
pub fn resize_linear(src: &FImg, dst_width: u32, dst_height: u32) -> TransformResult<FImg> {
    if dst_width == 0 || dst_height == 0 {
        return Err(TransformError::InvalidTargetSize(dst_width, dst_height));
    }

    let (src_w, src_h) = src.dimensions();
    if dst_width == src_w && dst_height == src_h {
        return Ok(src.clone());
    }

    let mut dst = FImg::new(dst_width, dst_height)?;

    let x_ratio = src_w as f32 / dst_width as f32;
    let y_ratio = src_h as f32 / dst_height as f32;

    for dy in 0..dst_height {
        let sy = ((dy as f32 + 0.5) * y_ratio - 0.5).max(0.0);
        let y0 = (sy as u32).min(src_h - 1);
        let y1 = (y0 + 1).min(src_h - 1);
        let fy = sy - y0 as f32;

        let row0 = src.row(y0);
        let row1 = src.row(y1);
        let dst_row = dst.row_mut(dy);

        for (dx, out) in dst_row.iter_mut().enumerate() {
            let sx = ((dx as f32 + 0.5) * x_ratio - 0.5).max(0.0);
            let x0 = (sx as usize).min(src_w as usize - 1);
            let x1 = (x0 + 1).min(src_w as usize - 1);
            let fx = sx - x0 as f32;

            let top = row0[x0] + fx * (row0[x1] - row0[x0]);
            let bottom = row1[x0] + fx * (row1[x1] - row1[x0]);
            *out = top + fy * (bottom - top);
        }
    }

    Ok(dst)
}

/// Resize every image in a slice to the given size
///
/// Componentwise application of [`resize_linear`]; the scheduler uses this
/// for channel stacks.
///
/// # Errors
///
/// Propagates the first resize failure.
pub fn resize_linear_all(
    src: &[FImg],
    dst_width: u32,
    dst_height: u32,
) -> TransformResult<Vec<FImg>> {
    src.iter()
        .map(|img| resize_linear(img, dst_width, dst_height))
        .collect()
}
