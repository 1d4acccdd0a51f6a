//! Measurement update: fuse segment votes into the belief

use super::voting::{prepare_segments, vote_histogram};
use super::{Belief, GridSpec, RoadSpec};
use crate::messages::Segment;
use laneloc_core::{LaneError, LaneResult};

/// Bayes update of `belief` with this cycle's segments
///
/// # Returns
/// `(likelihood, posterior)`. The likelihood is `None` when no segment
/// produced a vote inside the grid; the posterior is then `belief` unchanged.
///
/// # Errors
/// - `DisjointSupport` if the belief is zero wherever the likelihood is not
/// - `ShapeMismatch` if `belief` does not match `grid`
pub fn update(
    belief: &Belief,
    segments: &[Segment],
    road: &RoadSpec,
    grid: &GridSpec,
) -> LaneResult<(Option<Belief>, Belief)> {
    match fuse(belief, segments, road, grid)? {
        Some(fused) => Ok((Some(fused.likelihood), fused.posterior)),
        None => Ok((None, belief.clone())),
    }
}

/// Result of a measurement update that had at least one vote
pub(crate) struct Fused {
    pub likelihood: Belief,
    pub posterior: Belief,
    pub votes: usize,
}

pub(crate) fn fuse(
    belief: &Belief,
    segments: &[Segment],
    road: &RoadSpec,
    grid: &GridSpec,
) -> LaneResult<Option<Fused>> {
    grid.check_shape(belief)?;

    let segments = prepare_segments(segments, grid);
    let (counts, votes) = vote_histogram(&segments, road, grid);
    if votes == 0 {
        log::debug!("update: no votes from {} segments, skipping fusion", segments.len());
        return Ok(None);
    }

    let likelihood = counts / votes as f64;
    let product = &likelihood * belief;
    let total = product.sum();
    if !(total > 0.0) {
        return Err(LaneError::DisjointSupport { votes });
    }

    Ok(Some(Fused {
        likelihood,
        posterior: product / total,
        votes,
    }))
}
