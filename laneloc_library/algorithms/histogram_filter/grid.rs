//! Discretized (lateral offset, heading error) state space

use super::Belief;
use laneloc_core::{LaneError, LaneResult};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// Serializable grid description
///
/// Bounds plus cell counts; step sizes are derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub d_min: f64,
    pub d_max: f64,
    pub rows: usize,
    pub phi_min: f64,
    pub phi_max: f64,
    pub cols: usize,
    /// Segments whose midpoint lies farther than this are ignored (m)
    pub range_est: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            d_min: -0.7,
            d_max: 0.5,
            rows: 60,
            phi_min: -FRAC_PI_2,
            phi_max: FRAC_PI_2,
            cols: 30,
            range_est: 0.33,
        }
    }
}

/// Materialized grid with bin-center coordinates
///
/// Row `i` covers `[d_min + i*delta_d, d_min + (i+1)*delta_d)`, column `j` the
/// same for phi. Bins are half-open, so a coordinate equal to `d_max` or
/// `phi_max` lies outside the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSpec {
    pub d_min: f64,
    pub d_max: f64,
    pub phi_min: f64,
    pub phi_max: f64,
    pub delta_d: f64,
    pub delta_phi: f64,
    pub range_est: f64,
    rows: usize,
    cols: usize,
    /// Bin-center lateral offsets, constant along each row
    pub d: Array2<f64>,
    /// Bin-center heading errors, constant along each column
    pub phi: Array2<f64>,
}

impl GridSpec {
    /// Build a grid from bounds and cell counts
    pub fn new(config: &GridConfig) -> LaneResult<Self> {
        check_axis("d", config.d_min, config.d_max, config.rows)?;
        check_axis("phi", config.phi_min, config.phi_max, config.cols)?;
        if !(config.range_est.is_finite() && config.range_est > 0.0) {
            return Err(LaneError::config(format!(
                "range_est must be positive, got {}",
                config.range_est
            )));
        }

        let (rows, cols) = (config.rows, config.cols);
        let delta_d = (config.d_max - config.d_min) / rows as f64;
        let delta_phi = (config.phi_max - config.phi_min) / cols as f64;

        let d = Array2::from_shape_fn((rows, cols), |(i, _)| {
            config.d_min + (i as f64 + 0.5) * delta_d
        });
        let phi = Array2::from_shape_fn((rows, cols), |(_, j)| {
            config.phi_min + (j as f64 + 0.5) * delta_phi
        });

        Ok(Self {
            d_min: config.d_min,
            d_max: config.d_max,
            phi_min: config.phi_min,
            phi_max: config.phi_max,
            delta_d,
            delta_phi,
            range_est: config.range_est,
            rows,
            cols,
            d,
            phi,
        })
    }

    /// Build a grid from bounds and step sizes
    ///
    /// Each range must be an integral multiple of its step.
    pub fn from_steps(
        d_min: f64,
        d_max: f64,
        delta_d: f64,
        phi_min: f64,
        phi_max: f64,
        delta_phi: f64,
        range_est: f64,
    ) -> LaneResult<Self> {
        let rows = cells_for_step("d", d_min, d_max, delta_d)?;
        let cols = cells_for_step("phi", phi_min, phi_max, delta_phi)?;
        Self::new(&GridConfig {
            d_min,
            d_max,
            rows,
            phi_min,
            phi_max,
            cols,
            range_est,
        })
    }

    /// (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// All-zero histogram over this grid
    pub fn zeros(&self) -> Belief {
        Array2::zeros(self.shape())
    }

    /// Bin containing `(d, phi)`, or `None` outside the half-open bounds
    ///
    /// Non-finite coordinates never map to a bin.
    pub fn bin_index(&self, d: f64, phi: f64) -> Option<(usize, usize)> {
        let inside = d >= self.d_min && d < self.d_max && phi >= self.phi_min && phi < self.phi_max;
        if !inside {
            return None;
        }

        let i = ((d - self.d_min) / self.delta_d).floor() as usize;
        let j = ((phi - self.phi_min) / self.delta_phi).floor() as usize;

        // Rounding right below the upper bound can land on `rows`/`cols`
        Some((i.min(self.rows - 1), j.min(self.cols - 1)))
    }

    /// Center coordinates of bin `(i, j)`
    pub fn bin_center(&self, i: usize, j: usize) -> (f64, f64) {
        (
            self.d_min + (i as f64 + 0.5) * self.delta_d,
            self.phi_min + (j as f64 + 0.5) * self.delta_phi,
        )
    }

    pub(crate) fn check_shape(&self, belief: &Belief) -> LaneResult<()> {
        if belief.dim() != self.shape() {
            return Err(LaneError::ShapeMismatch {
                expected: self.shape(),
                actual: belief.dim(),
            });
        }
        Ok(())
    }
}

fn check_axis(name: &str, min: f64, max: f64, cells: usize) -> LaneResult<()> {
    if !(min.is_finite() && max.is_finite()) {
        return Err(LaneError::config(format!("{name} bounds must be finite")));
    }
    if min >= max {
        return Err(LaneError::config(format!(
            "{name}_min ({min}) must be below {name}_max ({max})"
        )));
    }
    if cells == 0 {
        return Err(LaneError::config(format!("{name} axis needs at least one cell")));
    }
    Ok(())
}

fn cells_for_step(name: &str, min: f64, max: f64, delta: f64) -> LaneResult<usize> {
    if !(delta.is_finite() && delta > 0.0) {
        return Err(LaneError::config(format!(
            "delta_{name} must be positive, got {delta}"
        )));
    }
    check_axis(name, min, max, 1)?;

    let ratio = (max - min) / delta;
    let cells = ratio.round();
    if (ratio - cells).abs() > 1e-6 {
        return Err(LaneError::config(format!(
            "{name} range {min}..{max} is not a whole number of {delta} steps"
        )));
    }
    Ok(cells as usize)
}
