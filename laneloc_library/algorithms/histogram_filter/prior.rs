//! Gaussian prior over the grid

use super::{Belief, GridSpec};
use laneloc_core::{LaneError, LaneResult};
use nalgebra::{Matrix2, Vector2};
use ndarray::Zip;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Mean and covariance of the initial belief, in (d, phi)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriorConfig {
    pub mean: [f64; 2],
    pub covariance: [[f64; 2]; 2],
}

impl Default for PriorConfig {
    fn default() -> Self {
        Self {
            mean: [0.0, 0.0],
            covariance: [[0.1, 0.0], [0.0, 0.1]],
        }
    }
}

/// Evaluate a bivariate normal density at every bin center
///
/// The result is the raw density, NOT a probability mass function: it does
/// not sum to 1. [`super::LaneFilter::new`] normalizes it before use.
///
/// # Errors
/// `InvalidConfig` if the covariance is not symmetric positive definite.
pub fn init(grid: &GridSpec, mean: [f64; 2], covariance: [[f64; 2]; 2]) -> LaneResult<Belief> {
    let cov = Matrix2::new(
        covariance[0][0],
        covariance[0][1],
        covariance[1][0],
        covariance[1][1],
    );
    if !cov.iter().all(|v| v.is_finite()) || !mean.iter().all(|v| v.is_finite()) {
        return Err(LaneError::config("prior mean and covariance must be finite"));
    }
    if (cov[(0, 1)] - cov[(1, 0)]).abs() > 1e-12 * cov.amax().max(1.0) {
        return Err(LaneError::config("prior covariance must be symmetric"));
    }

    let chol = cov
        .cholesky()
        .ok_or_else(|| LaneError::config("prior covariance must be positive definite"))?;
    let precision = chol.inverse();
    let norm = 1.0 / (2.0 * PI * cov.determinant().sqrt());
    let mu = Vector2::new(mean[0], mean[1]);

    let density = Zip::from(&grid.d).and(&grid.phi).map_collect(|&d, &phi| {
        let dx = Vector2::new(d, phi) - mu;
        let mahalanobis = dx.dot(&(precision * dx));
        norm * (-0.5 * mahalanobis).exp()
    });

    Ok(density)
}

impl PriorConfig {
    /// Shortcut for [`init`] with this config's parameters
    pub fn density(&self, grid: &GridSpec) -> LaneResult<Belief> {
        init(grid, self.mean, self.covariance)
    }
}
