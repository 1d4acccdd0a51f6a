//! Separable Gaussian smoothing with a zero-padded boundary

use super::{Belief, ProcessNoise};
use ndarray::{Array2, ArrayView1, ArrayView2, ArrayViewMut1, Axis, Zip};

/// Kernel support is truncated at this many standard deviations
const TRUNCATE: f64 = 4.0;

/// Kernel radius in cells for `sigma`
pub fn kernel_radius(sigma: f64) -> f64 {
    (TRUNCATE * sigma + 0.5).floor()
}

/// Normalized 1-D Gaussian kernel of radius `round(TRUNCATE * sigma)`
///
/// Allocates `2 * radius + 1` taps, so `sigma` should already be checked
/// against the grid with [`ProcessNoise::validate_for`].
pub fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    let radius = kernel_radius(sigma) as i64;
    let weights: Vec<f64> = (-radius..=radius)
        .map(|x| (-0.5 * (x * x) as f64 / (sigma * sigma)).exp())
        .collect();
    let total: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}

/// Smooth along rows (d) then columns (phi)
///
/// Mass pushed past the grid edge is lost, so the output may sum to less
/// than the input.
pub fn gaussian_smooth(hist: &Belief, noise: &ProcessNoise) -> Belief {
    let along_d = smooth_axis(hist.view(), Axis(0), noise.sigma_d);
    smooth_axis(along_d.view(), Axis(1), noise.sigma_phi)
}

fn smooth_axis(input: ArrayView2<f64>, axis: Axis, sigma: f64) -> Array2<f64> {
    let kernel = gaussian_kernel(sigma);
    let mut output = Array2::zeros(input.raw_dim());

    Zip::from(input.lanes(axis))
        .and(output.lanes_mut(axis))
        .for_each(|src, dst| correlate_lane(src, dst, &kernel));

    output
}

fn correlate_lane(src: ArrayView1<f64>, mut dst: ArrayViewMut1<f64>, kernel: &[f64]) {
    let n = src.len() as i64;
    let radius = (kernel.len() / 2) as i64;

    for (k, out) in dst.iter_mut().enumerate() {
        let k = k as i64;
        let lo = (k - radius).max(0);
        let hi = (k + radius).min(n - 1);
        *out = (lo..=hi)
            .map(|idx| kernel[(idx - k + radius) as usize] * src[idx as usize])
            .sum();
    }
}
