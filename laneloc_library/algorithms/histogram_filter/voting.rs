//! Segment filtering and voting in (d, phi) space

use super::{Belief, GridSpec, RoadSpec};
use crate::messages::{Segment, SegmentColor};

/// Which edge of which marking a segment lies on
///
/// Detected segments are oriented: the detector orders the endpoints so that
/// the bright side of the edge is consistent, which tells the two edges of a
/// marking apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkingEdge {
    LeftEdgeOfLeft,
    RightEdgeOfLeft,
    LeftEdgeOfRight,
    RightEdgeOfRight,
}

impl MarkingEdge {
    /// Classify a segment; `None` for non-marking colors
    pub fn classify(segment: &Segment) -> Option<Self> {
        let (p1, p2) = (segment.p1, segment.p2);
        match segment.color {
            SegmentColor::LeftMarking if p1.x > p2.x => Some(MarkingEdge::LeftEdgeOfLeft),
            SegmentColor::LeftMarking => Some(MarkingEdge::RightEdgeOfLeft),
            SegmentColor::RightMarking if p2.x > p1.x => Some(MarkingEdge::LeftEdgeOfRight),
            SegmentColor::RightMarking => Some(MarkingEdge::RightEdgeOfRight),
            SegmentColor::Other => None,
        }
    }

    /// Move a raw edge observation onto the lane centerline frame
    fn correct(self, d: f64, phi: f64, road: &RoadSpec) -> (f64, f64) {
        let half_lane = road.lanewidth / 2.0;
        match self {
            MarkingEdge::LeftEdgeOfLeft => (d - road.linewidth_off_white - half_lane, phi),
            MarkingEdge::RightEdgeOfLeft => {
                let d = d - road.linewidth_off_white;
                let d = 2.0 * road.lanewidth + road.linewidth_black - d;
                (d - half_lane, -phi)
            }
            MarkingEdge::LeftEdgeOfRight => {
                let d = d - road.linewidth_black;
                (half_lane - d, -phi)
            }
            MarkingEdge::RightEdgeOfRight => (d + road.linewidth_black - half_lane, phi),
        }
    }
}

/// Keep only marking segments in front of the robot and within `range_est`
pub fn prepare_segments(segments: &[Segment], grid: &GridSpec) -> Vec<Segment> {
    segments
        .iter()
        .filter(|seg| seg.color.is_marking())
        .filter(|seg| seg.p1.x >= 0.0 && seg.p2.x >= 0.0)
        .filter(|seg| {
            let range = seg.range();
            range > 0.0 && range < grid.range_est
        })
        .copied()
        .collect()
}

/// Turn one segment into a `(d, phi)` vote
///
/// A zero-length segment has no direction and produces a non-finite vote,
/// which [`GridSpec::bin_index`] rejects.
pub fn generate_vote(segment: &Segment, road: &RoadSpec) -> (f64, f64) {
    let (p1, p2) = (segment.p1, segment.p2);
    let (dx, dy) = (p2.x - p1.x, p2.y - p1.y);
    let length = dx.hypot(dy);
    let (tx, ty) = (dx / length, dy / length);
    let (nx, ny) = (-ty, tx);

    let d1 = nx * p1.x + ny * p1.y;
    let d2 = nx * p2.x + ny * p2.y;

    let d = (d1 + d2) / 2.0;
    let phi = ty.clamp(-1.0, 1.0).asin();

    match MarkingEdge::classify(segment) {
        Some(edge) => edge.correct(d, phi, road),
        None => (d, phi),
    }
}

/// Unweighted vote counts over the grid, with the number of votes cast
pub(crate) fn vote_histogram(
    segments: &[Segment],
    road: &RoadSpec,
    grid: &GridSpec,
) -> (Belief, usize) {
    let mut counts = grid.zeros();
    let mut votes = 0;

    for segment in segments {
        let (d, phi) = generate_vote(segment, road);
        if let Some(idx) = grid.bin_index(d, phi) {
            counts[idx] += 1.0;
            votes += 1;
        }
    }

    (counts, votes)
}

/// Normalized vote histogram, or `None` when no vote landed in the grid
pub fn generate_measurement_likelihood(
    segments: &[Segment],
    road: &RoadSpec,
    grid: &GridSpec,
) -> Option<Belief> {
    let (counts, votes) = vote_histogram(segments, road, grid);
    if votes == 0 {
        return None;
    }
    Some(counts / votes as f64)
}
