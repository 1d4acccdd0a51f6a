//! Histogram Filter for Lane Localization
//!
//! Discrete Bayes filter over the robot's lateral offset `d` and heading
//! error `phi` relative to the lane centerline.
//!
//! # Features
//!
//! - Gaussian prior over a regular `(d, phi)` grid
//! - Motion update from wheel tick deltas (shift + Gaussian blur)
//! - Measurement update from detected lane marking segments
//! - Argmax lane pose estimate
//!
//! # Example
//!
//! ```rust
//! use laneloc_library::algorithms::histogram_filter::{LaneFilter, LaneFilterConfig, UpdateOutcome};
//! use laneloc_library::{Segment, SegmentColor, WheelTicks};
//!
//! let mut filter = LaneFilter::new(LaneFilterConfig::default()).unwrap();
//!
//! filter.predict(WheelTicks::new(10, 12)).unwrap();
//!
//! // Right edge of the right (black) marking, 10 cm to the right
//! let segment = Segment::from_coords(0.2, -0.1, 0.1, -0.1, SegmentColor::RightMarking);
//! let outcome = filter.update(&[segment]).unwrap();
//! assert_eq!(outcome, UpdateOutcome::Fused { votes: 1 });
//!
//! let estimate = filter.estimate();
//! println!("d = {:.3} m, phi = {:.3} rad", estimate.d, estimate.phi);
//! ```

pub mod config;
pub mod grid;
pub mod predict;
pub mod prior;
pub mod smoothing;
pub mod specs;
pub mod update;
pub mod voting;

pub use config::LaneFilterConfig;
pub use grid::{GridConfig, GridSpec};
pub use predict::predict;
pub use prior::{init, PriorConfig};
pub use smoothing::{gaussian_kernel, gaussian_smooth};
pub use specs::{ProcessNoise, RoadSpec};
pub use update::update;
pub use voting::{generate_measurement_likelihood, generate_vote, prepare_segments, MarkingEdge};

pub use crate::algorithms::differential_drive::RobotSpec;

use crate::messages::{LaneEstimate, Segment, WheelTicks};
use laneloc_core::{LaneError, LaneResult};
use ndarray::Array2;

/// Probability mass over the grid, indexed `[d_row, phi_col]`
pub type Belief = Array2<f64>;

/// What a measurement update did with this cycle's segments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Belief multiplied by the likelihood of `votes` in-grid votes
    Fused { votes: usize },
    /// No segment voted inside the grid; belief untouched
    NoEvidence,
}

/// Lane pose filter
///
/// Owns the belief and runs one `predict` then `update` per control cycle.
pub struct LaneFilter {
    config: LaneFilterConfig,
    grid: GridSpec,
    belief: Belief,
    prior: Belief,              // normalized, restored by reset()
    likelihood: Option<Belief>, // last fused measurement likelihood
}

impl LaneFilter {
    /// Create a filter with its belief set to the normalized prior
    ///
    /// # Errors
    /// `InvalidConfig` if any section is invalid, a smoothing kernel is wider
    /// than the grid, or the prior puts no mass on the grid.
    pub fn new(config: LaneFilterConfig) -> LaneResult<Self> {
        config.validate()?;
        let grid = GridSpec::new(&config.grid)?;
        config.noise.validate_for(&grid)?;

        let density = config.prior.density(&grid)?;
        let total = density.sum();
        if !(total > 0.0 && total.is_finite()) {
            return Err(LaneError::config(format!(
                "prior has no mass on the grid (mean {:?})",
                config.prior.mean
            )));
        }
        let prior = density / total;

        log::debug!(
            "lane filter: {}x{} grid, delta_d={:.4}, delta_phi={:.4}",
            grid.rows(),
            grid.cols(),
            grid.delta_d,
            grid.delta_phi
        );

        Ok(Self {
            belief: prior.clone(),
            prior,
            grid,
            config,
            likelihood: None,
        })
    }

    /// Motion update from this cycle's tick deltas
    pub fn predict(&mut self, ticks: WheelTicks) -> LaneResult<()> {
        self.belief = predict::predict(
            &self.belief,
            ticks,
            &self.grid,
            &self.config.robot,
            &self.config.noise,
        )?;
        Ok(())
    }

    /// Measurement update from this cycle's segments
    ///
    /// On `DisjointSupport` the belief keeps its predicted value and the
    /// error is returned so the caller can decide whether to reset.
    pub fn update(&mut self, segments: &[Segment]) -> LaneResult<UpdateOutcome> {
        match update::fuse(&self.belief, segments, &self.config.road, &self.grid) {
            Ok(Some(fused)) => {
                self.belief = fused.posterior;
                self.likelihood = Some(fused.likelihood);
                Ok(UpdateOutcome::Fused { votes: fused.votes })
            }
            Ok(None) => {
                self.likelihood = None;
                Ok(UpdateOutcome::NoEvidence)
            }
            Err(err) => {
                self.likelihood = None;
                if err.is_divergence() {
                    log::warn!("lane filter: {err}, keeping predicted belief");
                }
                Err(err)
            }
        }
    }

    /// One full cycle: predict, update, estimate
    pub fn step(&mut self, ticks: WheelTicks, segments: &[Segment]) -> LaneResult<LaneEstimate> {
        self.predict(ticks)?;
        self.update(segments)?;
        Ok(self.estimate())
    }

    /// Center of the most probable bin
    ///
    /// Ties go to the first bin in row-major order.
    pub fn estimate(&self) -> LaneEstimate {
        let mut best = (0, 0);
        let mut best_p = f64::NEG_INFINITY;
        for (idx, &p) in self.belief.indexed_iter() {
            if p > best_p {
                best = idx;
                best_p = p;
            }
        }
        let (d, phi) = self.grid.bin_center(best.0, best.1);
        LaneEstimate::new(d, phi)
    }

    /// Restore the belief to the prior and forget the last likelihood
    pub fn reset(&mut self) {
        self.belief = self.prior.clone();
        self.likelihood = None;
    }

    pub fn belief(&self) -> &Belief {
        &self.belief
    }

    /// Likelihood fused by the last update, if it had any votes
    pub fn measurement_likelihood(&self) -> Option<&Belief> {
        self.likelihood.as_ref()
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    pub fn config(&self) -> &LaneFilterConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::SegmentColor;
    use approx::assert_relative_eq;

    fn right_edge_segment() -> Segment {
        // backward along y = -0.1, black marking: d = 0.1 + 0.025 - 0.115
        Segment::from_coords(0.2, -0.1, 0.1, -0.1, SegmentColor::RightMarking)
    }

    #[test]
    fn test_new_normalizes_prior() {
        let filter = LaneFilter::new(LaneFilterConfig::default()).unwrap();

        assert_eq!(filter.belief().dim(), (60, 30));
        assert_relative_eq!(filter.belief().sum(), 1.0, epsilon = 1e-12);
        assert!(filter.measurement_likelihood().is_none());
    }

    #[test]
    fn test_initial_estimate_near_prior_mean() {
        let filter = LaneFilter::new(LaneFilterConfig::default()).unwrap();
        let estimate = filter.estimate();

        assert!(estimate.d.abs() <= filter.grid().delta_d);
        assert!(estimate.phi.abs() <= filter.grid().delta_phi);
    }

    #[test]
    fn test_prior_off_grid_is_rejected() {
        let mut config = LaneFilterConfig::default();
        config.prior.mean = [1.0e3, 0.0];
        config.prior.covariance = [[1.0e-4, 0.0], [0.0, 1.0e-4]];

        let err = LaneFilter::new(config).err().unwrap();
        assert!(matches!(err, LaneError::InvalidConfig(_)));
    }

    #[test]
    fn test_oversized_noise_is_rejected() {
        let mut config = LaneFilterConfig::default();
        config.noise.sigma_d = 1.0e9;

        let err = LaneFilter::new(config).err().unwrap();
        assert!(matches!(err, LaneError::InvalidConfig(_)));
    }

    #[test]
    fn test_update_without_segments() {
        let mut filter = LaneFilter::new(LaneFilterConfig::default()).unwrap();
        let before = filter.belief().clone();

        assert_eq!(filter.update(&[]).unwrap(), UpdateOutcome::NoEvidence);
        assert_eq!(filter.belief(), &before);
        assert!(filter.measurement_likelihood().is_none());
    }

    #[test]
    fn test_update_fuses_votes() {
        let mut filter = LaneFilter::new(LaneFilterConfig::default()).unwrap();
        let segments = [right_edge_segment(), right_edge_segment()];

        let outcome = filter.update(&segments).unwrap();
        assert_eq!(outcome, UpdateOutcome::Fused { votes: 2 });
        assert_relative_eq!(filter.belief().sum(), 1.0, epsilon = 1e-12);

        let (d, phi) = generate_vote(&segments[0], &filter.config().road);
        let estimate = filter.estimate();
        assert!((estimate.d - d).abs() <= filter.grid().delta_d / 2.0 + 1e-12);
        assert!((estimate.phi - phi).abs() <= filter.grid().delta_phi / 2.0 + 1e-12);

        let likelihood = filter.measurement_likelihood().unwrap();
        assert_relative_eq!(likelihood.sum(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_disjoint_support_keeps_belief() {
        let mut config = LaneFilterConfig::default();
        // Prior concentrated far from the vote, below f64 resolution at the vote bin
        config.prior.mean = [-0.6, 1.4];
        config.prior.covariance = [[1.0e-5, 0.0], [0.0, 1.0e-5]];
        let mut filter = LaneFilter::new(config).unwrap();
        let before = filter.belief().clone();

        let err = filter.update(&[right_edge_segment()]).unwrap_err();
        assert!(err.is_divergence());
        assert_eq!(filter.belief(), &before);
        assert!(filter.measurement_likelihood().is_none());
    }

    #[test]
    fn test_step_and_reset() {
        let mut filter = LaneFilter::new(LaneFilterConfig::default()).unwrap();
        let prior = filter.belief().clone();

        filter.step(WheelTicks::new(5, 5), &[right_edge_segment()]).unwrap();
        assert_ne!(filter.belief(), &prior);

        filter.reset();
        assert_eq!(filter.belief(), &prior);
        assert!(filter.measurement_likelihood().is_none());
    }

    #[test]
    fn test_estimate_tie_breaks_to_first_bin() {
        let mut filter = LaneFilter::new(LaneFilterConfig::default()).unwrap();
        let mut belief = filter.grid().zeros();
        belief[[3, 7]] = 0.5;
        belief[[10, 2]] = 0.5;
        filter.belief = belief;

        let estimate = filter.estimate();
        let (d, phi) = filter.grid().bin_center(3, 7);
        assert_eq!(estimate, LaneEstimate::new(d, phi));
    }
}
