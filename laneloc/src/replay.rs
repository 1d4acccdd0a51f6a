//! Offline replay of recorded filter inputs
//!
//! A replay log is JSON lines, one control cycle per line:
//!
//! ```text
//! {"ticks":{"left":12,"right":14},"segments":[{"p1":{"x":0.2,"y":-0.1},"p2":{"x":0.1,"y":-0.1},"color":"right_marking"}]}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use laneloc_core::{LaneError, LaneResult};
use laneloc_library::{LaneEstimate, LaneFilter, Segment, UpdateOutcome, WheelTicks};
use serde::{Deserialize, Serialize};
use std::io::BufRead;

/// Inputs for one filter cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayCycle {
    pub ticks: WheelTicks,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

/// What the filter produced for one cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CycleReport {
    pub cycle: usize,
    pub estimate: LaneEstimate,
    /// Number of fused votes; 0 when there was no evidence
    pub votes: usize,
    /// The update diverged and the belief was handled per [`DivergencePolicy`]
    pub diverged: bool,
}

/// What to do when a measurement update has no overlap with the belief
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DivergencePolicy {
    /// Keep the predicted belief and carry on
    #[default]
    Keep,
    /// Restore the prior
    Reset,
    /// Stop the replay with the error
    Abort,
}

/// Parse a JSON-lines replay log
pub fn read_cycles<R: BufRead>(reader: R) -> LaneResult<Vec<ReplayCycle>> {
    let mut cycles = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let cycle = serde_json::from_str(line).map_err(|e| {
            LaneError::input(format!("replay log line {}: {e}", lineno + 1))
        })?;
        cycles.push(cycle);
    }
    Ok(cycles)
}

/// Run every cycle through `filter`
pub fn run(
    filter: &mut LaneFilter,
    cycles: &[ReplayCycle],
    policy: DivergencePolicy,
) -> LaneResult<Vec<CycleReport>> {
    let mut reports = Vec::with_capacity(cycles.len());

    for (cycle, input) in cycles.iter().enumerate() {
        filter.predict(input.ticks)?;

        let (votes, diverged) = match filter.update(&input.segments) {
            Ok(UpdateOutcome::Fused { votes }) => (votes, false),
            Ok(UpdateOutcome::NoEvidence) => (0, false),
            Err(err) if err.is_divergence() => match policy {
                DivergencePolicy::Keep => (0, true),
                DivergencePolicy::Reset => {
                    log::info!("cycle {cycle}: resetting belief to prior");
                    filter.reset();
                    (0, true)
                }
                DivergencePolicy::Abort => return Err(err),
            },
            Err(err) => return Err(err),
        };

        reports.push(CycleReport {
            cycle,
            estimate: filter.estimate(),
            votes,
            diverged,
        });
    }

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use laneloc_library::{LaneFilterConfig, SegmentColor};

    const LOG: &str = r#"
# two cycles, the second without detections
{"ticks":{"left":10,"right":10},"segments":[{"p1":{"x":0.2,"y":-0.1},"p2":{"x":0.1,"y":-0.1},"color":"right_marking"}]}

{"ticks":{"left":10,"right":10}}
"#;

    #[test]
    fn test_read_cycles_skips_blank_and_comments() {
        let cycles = read_cycles(LOG.as_bytes()).unwrap();

        assert_eq!(cycles.len(), 2);
        assert_eq!(cycles[0].ticks, WheelTicks::new(10, 10));
        assert_eq!(cycles[0].segments[0].color, SegmentColor::RightMarking);
        assert!(cycles[1].segments.is_empty());
    }

    #[test]
    fn test_bad_line_reports_position() {
        let err = read_cycles("{\"ticks\":{\"left\":1,\"right\":1}}\nnot json\n".as_bytes()).unwrap_err();
        match err {
            LaneError::InvalidInput(msg) => assert!(msg.contains("line 2")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_run_reports_each_cycle() {
        let cycles = read_cycles(LOG.as_bytes()).unwrap();
        let mut filter = LaneFilter::new(LaneFilterConfig::default()).unwrap();

        let reports = run(&mut filter, &cycles, DivergencePolicy::Keep).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].votes, 1);
        assert_eq!(reports[1].votes, 0);
        assert!(!reports[1].diverged);
        // the second cycle moves forward by the odometry shift
        assert!(reports[1].estimate.d > reports[0].estimate.d);
        assert_relative_eq!(reports[1].estimate.phi, reports[0].estimate.phi);
    }

    #[test]
    fn test_divergence_policies() {
        let mut config = LaneFilterConfig::default();
        config.prior.mean = [-0.6, 1.4];
        config.prior.covariance = [[1.0e-5, 0.0], [0.0, 1.0e-5]];
        config.noise.sigma_d = 0.1;
        config.noise.sigma_phi = 0.1;
        let cycles = read_cycles(LOG.as_bytes()).unwrap();

        let mut filter = LaneFilter::new(config.clone()).unwrap();
        assert!(run(&mut filter, &cycles[..1], DivergencePolicy::Abort).is_err());

        let mut filter = LaneFilter::new(config.clone()).unwrap();
        let reports = run(&mut filter, &cycles[..1], DivergencePolicy::Reset).unwrap();
        assert!(reports[0].diverged);
        let reset = LaneFilter::new(config).unwrap();
        assert_eq!(filter.belief(), reset.belief());
    }
}
