//! Shared fixtures for the laneloc benchmarks

use laneloc_library::{Segment, SegmentColor};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A reproducible frame of `count` detections in front of the robot
///
/// Roughly a third of the segments are non-marking clutter.
pub fn random_segments(count: usize, seed: u64) -> Vec<Segment> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let color = match rng.gen_range(0..3) {
                0 => SegmentColor::LeftMarking,
                1 => SegmentColor::RightMarking,
                _ => SegmentColor::Other,
            };
            let (x, y) = (rng.gen_range(0.05..0.3), rng.gen_range(-0.2..0.2));
            let (dx, dy) = (rng.gen_range(-0.05..0.05), rng.gen_range(-0.05..0.05));
            Segment::from_coords(x, y, x + dx, y + dy, color)
        })
        .collect()
}
