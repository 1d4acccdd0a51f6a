//! Road geometry and process noise constants

use super::smoothing::kernel_radius;
use super::GridSpec;
use laneloc_core::{LaneError, LaneResult};
use serde::{Deserialize, Serialize};

/// Lane and marking widths (m)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoadSpec {
    pub lanewidth: f64,
    /// Width of the off-white left marking
    pub linewidth_off_white: f64,
    /// Width of the black right marking
    pub linewidth_black: f64,
}

impl RoadSpec {
    pub fn validate(&self) -> LaneResult<()> {
        if !(self.lanewidth.is_finite() && self.lanewidth > 0.0) {
            return Err(LaneError::config(format!(
                "lanewidth must be positive, got {}",
                self.lanewidth
            )));
        }
        for (name, width) in [
            ("linewidth_off_white", self.linewidth_off_white),
            ("linewidth_black", self.linewidth_black),
        ] {
            if !(width.is_finite() && width >= 0.0) {
                return Err(LaneError::config(format!(
                    "{name} must be non-negative, got {width}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for RoadSpec {
    fn default() -> Self {
        Self {
            lanewidth: 0.23,
            linewidth_off_white: 0.05,
            linewidth_black: 0.025,
        }
    }
}

/// Gaussian smoothing applied after the motion shift, in cell units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessNoise {
    /// Standard deviation along the d axis (rows)
    pub sigma_d: f64,
    /// Standard deviation along the phi axis (columns)
    pub sigma_phi: f64,
}

impl ProcessNoise {
    pub fn new(sigma_d: f64, sigma_phi: f64) -> LaneResult<Self> {
        let noise = Self { sigma_d, sigma_phi };
        noise.validate()?;
        Ok(noise)
    }

    pub fn validate(&self) -> LaneResult<()> {
        for (name, sigma) in [("sigma_d", self.sigma_d), ("sigma_phi", self.sigma_phi)] {
            if !(sigma.is_finite() && sigma > 0.0) {
                return Err(LaneError::config(format!(
                    "process noise {name} must be positive, got {sigma}"
                )));
            }
        }
        Ok(())
    }

    /// Like [`validate`](Self::validate), and both kernels must fit inside
    /// `grid`: a radius reaching past the last cell of an axis is rejected.
    pub fn validate_for(&self, grid: &GridSpec) -> LaneResult<()> {
        self.validate()?;
        for (name, sigma, cells) in [
            ("sigma_d", self.sigma_d, grid.rows()),
            ("sigma_phi", self.sigma_phi, grid.cols()),
        ] {
            let radius = kernel_radius(sigma);
            if radius >= cells as f64 {
                return Err(LaneError::config(format!(
                    "process noise {name}={sigma} gives a kernel radius of {radius} cells, grid axis has {cells}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for ProcessNoise {
    fn default() -> Self {
        Self {
            sigma_d: 1.0,
            sigma_phi: 2.0,
        }
    }
}
