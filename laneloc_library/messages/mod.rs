//! Message types for laneloc
//!
//! Messages are organized by domain:
//! - Segment: line segments reported by the lane marking detector
//! - Odometry: wheel tick deltas, dead-reckoned poses and lane estimates
//!
//! All message types are re-exported at the crate root for convenience.

pub mod odometry;
pub mod segment;

pub use odometry::{LaneEstimate, Pose2D, WheelTicks};
pub use segment::{Point2, Segment, SegmentColor};
