//! Wheel odometry and lane pose messages

use serde::{Deserialize, Serialize};

/// Encoder tick deltas accumulated over one control cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WheelTicks {
    pub left: i32,
    pub right: i32,
}

impl WheelTicks {
    pub fn new(left: i32, right: i32) -> Self {
        Self { left, right }
    }

    /// No motion this cycle
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Best lane pose estimate handed to the steering consumer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct LaneEstimate {
    /// Lateral offset from the lane centerline (m)
    pub d: f64,
    /// Heading error relative to the lane tangent (rad)
    pub phi: f64,
}

impl LaneEstimate {
    pub fn new(d: f64, phi: f64) -> Self {
        Self { d, phi }
    }
}

/// Dead-reckoned planar pose
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Pose2D {
    pub x: f64,
    pub y: f64,
    pub theta: f64,
}

impl Pose2D {
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Self { x, y, theta }
    }
}
