//! Adaptive manifold filtering (edge-preserving smoothing)
//!
//! High-dimensional edge-preserving filter after Gastal & Oliveira,
//! "Adaptive manifolds for real-time high-dimensional filtering",
//! SIGGRAPH 2012. The joint image manifold is approximated by a binary
//! tree of smooth guide signals ("manifolds"); every tree node filters
//! the source weighted by its closeness to the node's manifold, and the
//! per-node results are normalized into the output.
//!
//! Compared to a single-manifold range filter at the same spatial blur,
//! smoothing strength decays with dissimilarity along the dominant local
//! gradient direction rather than with raw intensity difference, which
//! keeps edges noticeably sharper.
//!
//! # Algorithm
//!
//! Per tree node, on a decimated working grid:
//! - weight the source by a Gaussian of the distance to the node manifold
//!   (splatting),
//! - blur the weighted channels with a domain-transform recursive filter
//!   guided by the manifold,
//! - redistribute the blurred result back to full resolution, weighted
//!   again (slicing), into global accumulators.
//!
//! Below the configured tree height the node's pixels are split in two by
//! the sign of their residual's projection onto the dominant residual
//! direction, and a new manifold is propagated to each child cluster.
//!
//! # Example
//!
//! ```ignore
//! use manifold_filter::{AmFilterParams, adaptive_manifold_filter};
//!
//! let params = AmFilterParams { sigma_s: 16.0, sigma_r: 0.2, ..Default::default() };
//! let smoothed = adaptive_manifold_filter(&img, None, &params)?;
//! ```

use crate::domain_transform::DomainTransformFilter;
use crate::error::{FilterError, FilterResult};
use crate::pca::principal_direction;
use crate::recursive::h_filter;
use manifold_core::{FImg, Image, ImageDepth, Mask};
use manifold_transform::resize_linear;
use rand::{RngExt, SeedableRng, rngs::StdRng};

/// Adaptive manifold filter parameters
///
/// Validated eagerly when the filter runs: `sigma_s` must be at least 1
/// and `sigma_r` must lie in (0, 1]. Two fields have documented
/// default-substitution rules instead of hard validation: a non-positive
/// `tree_height` selects the automatically computed height, and
/// `num_pca_iterations` is clamped up to 1.
#[derive(Debug, Clone)]
pub struct AmFilterParams {
    /// Spatial standard deviation (>= 1)
    pub sigma_s: f64,
    /// Range standard deviation, relative to a [0, 1] joint range ((0, 1])
    pub sigma_r: f64,
    /// Blend the result toward the source for pixels far from every
    /// manifold (candidate outliers)
    pub adjust_outliers: bool,
    /// Manifold tree height; <= 0 computes it from the sigmas
    pub tree_height: i32,
    /// Power iterations for the principal direction estimate (clamped to >= 1)
    pub num_pca_iterations: u32,
    /// Random eigenvector initialization (seeded from the joint signal);
    /// false selects a deterministic alternating start vector
    pub use_rng: bool,
}

impl Default for AmFilterParams {
    fn default() -> Self {
        AmFilterParams {
            sigma_s: 16.0,
            sigma_r: 0.2,
            adjust_outliers: false,
            tree_height: -1,
            num_pca_iterations: 1,
            use_rng: true,
        }
    }
}

/// Apply the adaptive manifold filter
///
/// # Arguments
/// * `src` - Source image (any depth, any channel count)
/// * `joint` - Optional joint/guide image driving the range weighting;
///   must match the source size. `None` uses the source itself.
/// * `params` - Filter parameters
///
/// # Returns
///
/// A filtered image with the source's dimensions, channel count and depth.
///
/// # Errors
///
/// Returns `FilterError::InvalidParameters` for out-of-range sigmas and
/// `FilterError::DimensionMismatch` if the joint size differs from the
/// source size.
pub fn adaptive_manifold_filter(
    src: &Image,
    joint: Option<&Image>,
    params: &AmFilterParams,
) -> FilterResult<Image> {
    if params.sigma_s < 1.0 {
        return Err(FilterError::InvalidParameters(format!(
            "sigma_s must be at least 1, got {}",
            params.sigma_s
        )));
    }
    if !(params.sigma_r > 0.0 && params.sigma_r <= 1.0) {
        return Err(FilterError::InvalidParameters(format!(
            "sigma_r must be in (0, 1], got {}",
            params.sigma_r
        )));
    }
    if let Some(joint) = joint
        && joint.dimensions() != src.dimensions()
    {
        return Err(FilterError::DimensionMismatch {
            expected: src.dimensions(),
            actual: joint.dimensions(),
        });
    }

    let mut exec = FilterExec::new(src, joint, params)?;
    exec.run()
}

/// One-call convenience wrapper with the joint image first
///
/// Mirrors the common joint-filtering call shape: `joint` guides the
/// smoothing of `src`.
pub fn am_filter(
    joint: &Image,
    src: &Image,
    sigma_s: f64,
    sigma_r: f64,
    adjust_outliers: bool,
) -> FilterResult<Image> {
    let params = AmFilterParams {
        sigma_s,
        sigma_r,
        adjust_outliers,
        ..Default::default()
    };
    adaptive_manifold_filter(src, Some(joint), &params)
}

/// Tree height from the sigmas: deeper for larger spatial scales and
/// tighter range tolerances, never less than 2
fn manifold_tree_height(sigma_s: f64, sigma_r: f64) -> u32 {
    let hs = sigma_s.log2().floor() - 1.0;
    let lr = 1.0 - sigma_r;
    (hs * lr).ceil().max(2.0) as u32
}

/// Decimation ratio between full and working resolution: the largest
/// power of two not above `min(sigma_s/4, 256*sigma_r)`, floored at 1
fn resize_ratio(sigma_s: f64, sigma_r: f64) -> f64 {
    let df = (sigma_s / 4.0).min(256.0 * sigma_r);
    let df = 2.0f64.powi(df.log2().floor() as i32);
    df.max(1.0)
}

/// Per-invocation filter state
///
/// Owns everything the recursive traversal touches: the split source and
/// joint channels, the global accumulators, the per-node scratch buffers
/// and the seeded RNG. Nothing outlives one `run()`.
struct FilterExec {
    sigma_s: f64,
    sigma_r: f64,
    adjust_outliers: bool,
    num_pca_iterations: u32,
    use_rng: bool,
    tree_height: u32,
    sigma_r_over_sqrt_2: f32,

    src_size: (u32, u32),
    small_size: (u32, u32),
    ratio: f64,

    /// Source channels at their raw sample scale
    src_cn: Vec<FImg>,
    /// Joint channels normalized to [0, 1]
    joint_cn: Vec<FImg>,

    /// Global accumulators, zeroed once and never reallocated
    sum_w_psi_blur: Vec<FImg>,
    sum_w_psi_blur_0: FImg,
    /// Running per-pixel minimum squared distance to any manifold;
    /// allocated only with outlier adjustment
    min_dist_sq: Option<FImg>,

    /// Current node's weight field
    w_k: FImg,
    /// Current node's manifold at full resolution
    eta_full: Vec<FImg>,

    rng: StdRng,
    out_depth: ImageDepth,
}

impl FilterExec {
    fn new(src: &Image, joint: Option<&Image>, params: &AmFilterParams) -> FilterResult<Self> {
        let src_size = src.dimensions();
        let (src_w, src_h) = src_size;

        let ratio = resize_ratio(params.sigma_s, params.sigma_r);
        let small_size = (
            ((src_w as f64 / ratio).round() as u32).max(1),
            ((src_h as f64 / ratio).round() as u32).max(1),
        );

        let src_cn = src.to_channels();

        let joint_cn = match joint {
            Some(joint) => {
                let normalizer = joint.depth().normalizer();
                let mut channels = joint.to_channels();
                if normalizer != 1.0 {
                    for chan in &mut channels {
                        chan.mul_constant(normalizer);
                    }
                }
                channels
            }
            None => {
                let normalizer = src.depth().normalizer();
                if normalizer == 1.0 {
                    src_cn.clone()
                } else {
                    let mut channels = src_cn.clone();
                    for chan in &mut channels {
                        chan.mul_constant(normalizer);
                    }
                    channels
                }
            }
        };

        let sum_w_psi_blur = src_cn.iter().map(|_| FImg::new(src_w, src_h)).collect::<Result<_, _>>()?;
        let sum_w_psi_blur_0 = FImg::new(src_w, src_h)?;
        let min_dist_sq = if params.adjust_outliers {
            Some(FImg::new(src_w, src_h)?)
        } else {
            None
        };

        let tree_height = if params.tree_height <= 0 {
            manifold_tree_height(params.sigma_s, params.sigma_r)
        } else {
            params.tree_height as u32
        };

        // Seed derived from the joint signal's center pixel so repeated
        // runs on the same input draw the same initialization vectors.
        let seed_coef = joint_cn[0].get_pixel_unchecked(src_w / 2, src_h / 2);
        let base_coef = u64::MAX / 0xFFFF;
        let seed = (base_coef as f64 * seed_coef as f64) as u64;

        Ok(FilterExec {
            sigma_s: params.sigma_s,
            sigma_r: params.sigma_r,
            adjust_outliers: params.adjust_outliers,
            num_pca_iterations: params.num_pca_iterations.max(1),
            use_rng: params.use_rng,
            tree_height,
            sigma_r_over_sqrt_2: (params.sigma_r / std::f64::consts::SQRT_2) as f32,
            src_size,
            small_size,
            ratio,
            src_cn,
            joint_cn,
            sum_w_psi_blur,
            sum_w_psi_blur_0,
            min_dist_sq,
            w_k: FImg::new(src_w, src_h)?,
            eta_full: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
            out_depth: src.depth(),
        })
    }

    fn downsample(&self, img: &FImg) -> FilterResult<FImg> {
        debug_assert_eq!(img.dimensions(), self.src_size);
        Ok(resize_linear(img, self.small_size.0, self.small_size.1)?)
    }

    fn downsample_all(&self, imgs: &[FImg]) -> FilterResult<Vec<FImg>> {
        imgs.iter().map(|img| self.downsample(img)).collect()
    }

    fn upsample(&self, img: &FImg) -> FilterResult<FImg> {
        debug_assert_eq!(img.dimensions(), self.small_size);
        Ok(resize_linear(img, self.src_size.0, self.src_size.1)?)
    }

    fn upsample_all(&self, imgs: &[FImg]) -> FilterResult<Vec<FImg>> {
        imgs.iter().map(|img| self.upsample(img)).collect()
    }

    fn run(&mut self) -> FilterResult<Image> {
        let (src_w, src_h) = self.src_size;

        let root_mask = Mask::filled(src_w, src_h)?;
        let root_eta: Vec<FImg> = self
            .joint_cn
            .iter()
            .map(|chan| h_filter(chan, self.sigma_s as f32))
            .collect();

        self.build_manifolds_and_filter(root_eta, root_mask, 1)?;

        self.gather_result()
    }

    /// Weight field from a full-resolution manifold: per pixel,
    /// `exp(-0.5 * d^2 / sigma^2)` with `d^2` the squared channel distance
    /// between joint signal and manifold. Also maintains the running
    /// minimum of `d^2` when outlier adjustment is on.
    fn compute_w_k(&mut self, eta: &[FImg], tree_level: u32) {
        debug_assert_eq!(eta.len(), self.joint_cn.len());

        let sigma = self.sigma_r_over_sqrt_2;
        let arg_const = -0.5 / (sigma * sigma);

        let wk = self.w_k.data_mut();
        wk.fill(0.0);

        for (chan, joint) in eta.iter().zip(self.joint_cn.iter()) {
            let e = chan.data();
            let j = joint.data();
            for i in 0..wk.len() {
                let d = e[i] - j[i];
                wk[i] += d * d;
            }
        }

        if let Some(min_dist) = &mut self.min_dist_sq {
            let m = min_dist.data_mut();
            if tree_level == 1 {
                m.copy_from_slice(wk);
            } else {
                for (mv, &dv) in m.iter_mut().zip(wk.iter()) {
                    *mv = mv.min(dv);
                }
            }
        }

        for v in wk.iter_mut() {
            *v = (arg_const * *v).exp();
        }
    }

    /// One tree node: splat, blur, slice, then split and recurse when the
    /// node is above the leaf level.
    ///
    /// `eta` arrives at full resolution only for the root; child
    /// manifolds are propagated at working resolution.
    fn build_manifolds_and_filter(
        &mut self,
        eta: Vec<FImg>,
        cluster: Mask,
        tree_level: u32,
    ) -> FilterResult<()> {
        debug_assert_eq!(eta.len(), self.joint_cn.len());

        // Splatting: the weight field always comes from the
        // full-resolution manifold, the blur stage always runs on the
        // working grid.
        let eta_small: Vec<FImg>;
        if eta[0].dimensions() == self.src_size {
            self.compute_w_k(&eta, tree_level);
            eta_small = self.downsample_all(&eta)?;
            self.eta_full = eta;
        } else {
            let eta_full = self.upsample_all(&eta)?;
            self.compute_w_k(&eta_full, tree_level);
            self.eta_full = eta_full;
            eta_small = eta;
        }

        let mut psi_splat_small = Vec::with_capacity(self.src_cn.len());
        for chan in &self.src_cn {
            let weighted = chan.mul(&self.w_k)?;
            psi_splat_small.push(self.downsample(&weighted)?);
        }
        let psi_splat_0_small = self.downsample(&self.w_k)?;

        // Blurring on the working grid, guided by the decimated manifold.
        let rf_ss = (self.sigma_s / self.ratio) as f32;
        let rf_sr = self.sigma_r_over_sqrt_2;
        let dtf = DomainTransformFilter::new(&eta_small, rf_ss, rf_sr, 1)?;
        let psi_blur = dtf.filter_all(&psi_splat_small)?;
        let psi_blur_0 = dtf.filter(&psi_splat_0_small)?;
        drop(psi_splat_small);

        // Slicing: weighted redistribution into the global accumulators.
        for (c, blur) in psi_blur.iter().enumerate() {
            let mut sliced = self.upsample(blur)?;
            sliced.mul_assign(&self.w_k)?;
            self.sum_w_psi_blur[c].add_assign(&sliced)?;
        }
        {
            let mut sliced = self.upsample(&psi_blur_0)?;
            sliced.mul_assign(&self.w_k)?;
            self.sum_w_psi_blur_0.add_assign(&sliced)?;
        }

        // Build the child manifolds and recurse.
        if tree_level < self.tree_height {
            let (cluster_minus, cluster_plus) = self.compute_clusters(&cluster)?;

            let teta = self.w_k.linear_combination(-1.0, 1.0);
            let eta_minus = self.compute_eta(&teta, &cluster_minus)?;
            let eta_plus = self.compute_eta(&teta, &cluster_plus)?;
            drop(teta);

            // Release this level's buffers before descending; peak
            // memory stays proportional to the tree height.
            self.eta_full.clear();
            drop(cluster);

            self.build_manifolds_and_filter(eta_minus, cluster_minus, tree_level + 1)?;
            self.build_manifolds_and_filter(eta_plus, cluster_plus, tree_level + 1)?;
        }

        Ok(())
    }

    /// Split a node's pixels by the sign of their residual's projection
    /// onto the dominant residual direction
    ///
    /// The two outputs exactly partition `cluster`: zero projections go
    /// to the plus side, pixels outside `cluster` to neither.
    fn compute_clusters(&mut self, cluster: &Mask) -> FilterResult<(Mask, Mask)> {
        let cn = self.joint_cn.len();

        let mut residual = Vec::with_capacity(cn);
        for (joint, eta) in self.joint_cn.iter().zip(self.eta_full.iter()) {
            residual.push(joint.sub(eta)?);
        }

        let init: Vec<f32> = if self.use_rng {
            (0..cn).map(|_| self.rng.random_range(-0.5f32..0.5f32)).collect()
        } else {
            (0..cn).map(|i| if i % 2 == 0 { 0.5 } else { -0.5 }).collect()
        };

        let eigen = principal_direction(&residual, cluster, &init, self.num_pca_iterations)?;

        let (src_w, src_h) = self.src_size;
        let mut minus = Mask::new(src_w, src_h)?;
        let mut plus = Mask::new(src_w, src_h)?;

        let channels: Vec<&[f32]> = residual.iter().map(|c| c.data()).collect();
        let in_cluster = cluster.data();
        let minus_data = minus.data_mut();
        let plus_data = plus.data_mut();

        for i in 0..in_cluster.len() {
            if !in_cluster[i] {
                continue;
            }
            let mut proj = 0.0f32;
            for (c, chan) in channels.iter().enumerate() {
                proj += eigen[c] * chan[i];
            }
            if proj < 0.0 {
                minus_data[i] = true;
            } else {
                plus_data[i] = true;
            }
        }

        Ok((minus, plus))
    }

    /// Propagate a manifold to a child cluster
    ///
    /// Normalized locally-weighted average of the joint signal over the
    /// cluster: `teta` (the parent's complement weight) is zeroed outside
    /// the cluster, decimated and blurred, and each blurred weighted
    /// joint channel is divided by it. Neighborhoods with no cluster mass
    /// get a zero guide value; their weights vanish downstream.
    fn compute_eta(&self, teta: &FImg, cluster: &Mask) -> FilterResult<Vec<FImg>> {
        debug_assert_eq!(teta.dimensions(), self.src_size);
        debug_assert_eq!(cluster.dimensions(), self.src_size);

        let sigma = (self.sigma_s / self.ratio) as f32;

        let mut teta_masked = teta.clone();
        for (v, &keep) in teta_masked.data_mut().iter_mut().zip(cluster.data().iter()) {
            if !keep {
                *v = 0.0;
            }
        }

        let teta_masked_blur = h_filter(&self.downsample(&teta_masked)?, sigma);

        let mut eta = Vec::with_capacity(self.joint_cn.len());
        for joint in &self.joint_cn {
            let weighted = teta_masked.mul(joint)?;
            let blurred = h_filter(&self.downsample(&weighted)?, sigma);
            eta.push(blurred.div_or_zero(&teta_masked_blur)?);
        }

        Ok(eta)
    }

    /// Normalize the accumulators into the output image, optionally
    /// blending toward the source for likely outliers
    fn gather_result(&mut self) -> FilterResult<Image> {
        let mut dst_cn = Vec::with_capacity(self.src_cn.len());

        if let Some(mut alpha) = self.min_dist_sq.take() {
            // alpha = exp(-0.5 * min_dist^2 / sigma_r^2): confidence that
            // the pixel was ever close to some manifold.
            let sigma_member = (-0.5 / (self.sigma_r * self.sigma_r)) as f32;
            alpha.mul_constant(sigma_member);
            alpha.exp_in_place();

            for (sum, src) in self.sum_w_psi_blur.iter().zip(self.src_cn.iter()) {
                let mut g = sum.div_or_zero(&self.sum_w_psi_blur_0)?;
                g = g.sub(src)?;
                g.mul_assign(&alpha)?;
                g.add_assign(src)?;
                dst_cn.push(g);
            }
        } else {
            for sum in &self.sum_w_psi_blur {
                dst_cn.push(sum.div_or_zero(&self.sum_w_psi_blur_0)?);
            }
        }

        Ok(Image::from_channels(&dst_cn, self.out_depth)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_u8(width: u32, height: u32) -> Image {
        let mut data = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                data.push((x * 7 + y * 13) as u8);
            }
        }
        Image::from_u8(width, height, 1, data).unwrap()
    }

    #[test]
    fn test_params_default() {
        let params = AmFilterParams::default();
        assert_eq!(params.sigma_s, 16.0);
        assert_eq!(params.sigma_r, 0.2);
        assert!(!params.adjust_outliers);
        assert_eq!(params.tree_height, -1);
        assert_eq!(params.num_pca_iterations, 1);
        assert!(params.use_rng);
    }

    #[test]
    fn test_invalid_sigmas_rejected() {
        let img = gradient_u8(16, 16);

        let mut params = AmFilterParams::default();
        params.sigma_s = 0.5;
        assert!(adaptive_manifold_filter(&img, None, &params).is_err());

        let mut params = AmFilterParams::default();
        params.sigma_r = 0.0;
        assert!(adaptive_manifold_filter(&img, None, &params).is_err());

        let mut params = AmFilterParams::default();
        params.sigma_r = 1.5;
        assert!(adaptive_manifold_filter(&img, None, &params).is_err());
    }

    #[test]
    fn test_joint_size_mismatch_rejected() {
        let src = gradient_u8(16, 16);
        let joint = gradient_u8(8, 16);

        let result = adaptive_manifold_filter(&src, Some(&joint), &AmFilterParams::default());
        assert!(matches!(
            result,
            Err(FilterError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_manifold_tree_height() {
        // floor(log2(16)) - 1 = 3; 3 * (1 - 0.2) = 2.4 -> 3
        assert_eq!(manifold_tree_height(16.0, 0.2), 3);
        // Small spatial scales bottom out at 2.
        assert_eq!(manifold_tree_height(2.0, 0.5), 2);
        // Tight range tolerance deepens the tree.
        assert_eq!(manifold_tree_height(64.0, 0.05), 5);
    }

    #[test]
    fn test_resize_ratio() {
        // min(16/4, 256*0.2) = 4 -> 4
        assert_eq!(resize_ratio(16.0, 0.2), 4.0);
        // min(4/4, ...) = 1 -> 1
        assert_eq!(resize_ratio(4.0, 0.5), 1.0);
        // min(256/4, 256*0.01) = 2.56 -> 2
        assert_eq!(resize_ratio(256.0, 0.01), 2.0);
        // Never below 1.
        assert_eq!(resize_ratio(1.0, 0.001), 1.0);
    }

    #[test]
    fn test_output_matches_source_geometry() {
        let img = gradient_u8(24, 18);
        let out = adaptive_manifold_filter(&img, None, &AmFilterParams::default()).unwrap();

        assert_eq!(out.dimensions(), (24, 18));
        assert_eq!(out.channels(), 1);
        assert_eq!(out.depth(), ImageDepth::U8);
    }

    #[test]
    fn test_weight_field_in_unit_range() {
        let img = gradient_u8(20, 20);
        let params = AmFilterParams::default();
        let mut exec = FilterExec::new(&img, None, &params).unwrap();

        let eta: Vec<FImg> = exec
            .joint_cn
            .iter()
            .map(|chan| h_filter(chan, params.sigma_s as f32))
            .collect();
        exec.compute_w_k(&eta, 1);

        for &w in exec.w_k.data() {
            assert!((0.0..=1.0).contains(&w), "weight {} out of range", w);
        }
    }

    #[test]
    fn test_min_dist_tracks_running_minimum() {
        let img = gradient_u8(12, 12);
        let params = AmFilterParams {
            adjust_outliers: true,
            ..Default::default()
        };
        let mut exec = FilterExec::new(&img, None, &params).unwrap();

        // Root overwrite, then a closer manifold must lower the minimum.
        let far: Vec<FImg> = exec
            .joint_cn
            .iter()
            .map(|chan| chan.linear_combination(1.0, 0.5))
            .collect();
        exec.compute_w_k(&far, 1);
        let after_root = exec.min_dist_sq.clone().unwrap();

        let near = exec.joint_cn.clone();
        exec.compute_w_k(&near, 2);
        let after_near = exec.min_dist_sq.clone().unwrap();

        for (&a, &b) in after_root.data().iter().zip(after_near.data().iter()) {
            assert!(b <= a);
        }
        assert_eq!(after_near.max_value(), Some(0.0));
    }

    #[test]
    fn test_cluster_partition_is_exact() {
        let img = gradient_u8(16, 16);
        let params = AmFilterParams {
            use_rng: false,
            ..Default::default()
        };
        let mut exec = FilterExec::new(&img, None, &params).unwrap();

        exec.eta_full = exec
            .joint_cn
            .iter()
            .map(|chan| h_filter(chan, params.sigma_s as f32))
            .collect();

        let parent = Mask::filled(16, 16).unwrap();
        let (minus, plus) = exec.compute_clusters(&parent).unwrap();

        assert!(minus.and(&plus).unwrap().is_empty());
        assert_eq!(minus.union(&plus).unwrap(), parent);
    }

    #[test]
    fn test_pca_iterations_clamped() {
        let img = gradient_u8(8, 8);
        let params = AmFilterParams {
            num_pca_iterations: 0,
            ..Default::default()
        };
        let exec = FilterExec::new(&img, None, &params).unwrap();
        assert_eq!(exec.num_pca_iterations, 1);
    }

    #[test]
    fn test_explicit_tree_height_respected() {
        let img = gradient_u8(8, 8);
        let params = AmFilterParams {
            tree_height: 1,
            ..Default::default()
        };
        let exec = FilterExec::new(&img, None, &params).unwrap();
        assert_eq!(exec.tree_height, 1);
    }
}
