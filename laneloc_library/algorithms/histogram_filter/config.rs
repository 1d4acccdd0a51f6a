//! Filter configuration, loadable from YAML / TOML / JSON

use super::{GridConfig, PriorConfig, ProcessNoise, RoadSpec};
use crate::algorithms::differential_drive::RobotSpec;
use laneloc_core::LaneResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything [`super::LaneFilter`] needs at construction
///
/// Missing sections fall back to their defaults, so a config file only has
/// to name what it changes:
///
/// ```yaml
/// road:
///   lanewidth: 0.25
///   linewidth_off_white: 0.05
///   linewidth_black: 0.025
/// noise:
///   sigma_d: 0.5
///   sigma_phi: 1.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LaneFilterConfig {
    pub grid: GridConfig,
    pub road: RoadSpec,
    pub robot: RobotSpec,
    pub noise: ProcessNoise,
    pub prior: PriorConfig,
}

impl LaneFilterConfig {
    /// Load from a file, format picked by extension
    pub fn from_file(path: impl AsRef<Path>) -> LaneResult<Self> {
        let config: Self = laneloc_core::load_config(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section. Grid and prior are checked when the filter
    /// materializes them.
    pub fn validate(&self) -> LaneResult<()> {
        self.road.validate()?;
        self.robot.validate()?;
        self.noise.validate()?;
        Ok(())
    }
}
