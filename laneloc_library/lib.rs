//! # laneloc Library
//!
//! Messages and algorithms for lane localization on a differential drive robot.
//!
//! ## Structure
//!
//! ```text
//! laneloc_library/
//! ── messages/       # Segments, wheel ticks, poses and estimates
//! ── algorithms/     # Histogram filter, kinematics and controllers
//! ```
//!
//! ## Usage
//!
//! ```rust
//! // Message types and the filter are re-exported at the root for convenience
//! use laneloc_library::{LaneFilter, LaneFilterConfig, Segment, SegmentColor, WheelTicks};
//!
//! let mut filter = LaneFilter::new(LaneFilterConfig::default()).unwrap();
//!
//! let segments = [Segment::from_coords(0.2, -0.1, 0.1, -0.1, SegmentColor::RightMarking)];
//! let estimate = filter.step(WheelTicks::new(8, 8), &segments).unwrap();
//! assert!(estimate.d.abs() < 0.1);
//!
//! // Or import from specific modules
//! use laneloc_library::algorithms::histogram_filter::{generate_vote, RoadSpec};
//! use laneloc_library::messages::Point2;
//! ```

pub mod algorithms;
pub mod messages;

// Re-export message types at the crate root for convenience
pub use messages::*;

pub use algorithms::histogram_filter::{
    Belief, GridSpec, LaneFilter, LaneFilterConfig, RobotSpec, UpdateOutcome,
};

/// Commonly used types in one import
pub mod prelude {
    pub use crate::algorithms::differential_drive::DifferentialDrive;
    pub use crate::algorithms::histogram_filter::{
        Belief, GridConfig, GridSpec, LaneFilter, LaneFilterConfig, PriorConfig, ProcessNoise,
        RoadSpec, RobotSpec, UpdateOutcome,
    };
    pub use crate::algorithms::pid::HeadingPid;
    pub use crate::messages::*;
    pub use laneloc_core::{LaneError, LaneResult};
}
