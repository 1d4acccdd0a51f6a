//! Differential Drive Kinematics
//!
//! Wheel encoder kinematics and dead reckoning for differential drive robots.
//!
//! # Features
//!
//! - Encoder ticks → wheel rotation
//! - Tick deltas → linear / angular displacement (used by the lane filter)
//! - Midpoint dead-reckoning pose update
//!
//! # Example
//!
//! ```rust
//! use laneloc_library::algorithms::differential_drive::{DifferentialDrive, wheel_rotation};
//! use laneloc_library::Pose2D;
//!
//! let dd = DifferentialDrive::new(0.1, 0.0318);  // wheel_base, wheel_radius
//!
//! let (dphi_left, _) = wheel_rotation(135, 0, 135);   // one full turn
//! let (dphi_right, _) = wheel_rotation(135, 0, 135);
//!
//! let pose = dd.pose_estimation(Pose2D::default(), dphi_left, dphi_right);
//! assert!(pose.x > 0.19);
//! ```

use crate::messages::{Pose2D, WheelTicks};
use laneloc_core::{LaneError, LaneResult};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Tick-level robot geometry used by the lane filter's motion model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RobotSpec {
    /// Distance between the wheels (m)
    pub wheel_base: f64,
    /// Distance travelled by a wheel per encoder tick (m)
    pub ticks_to_distance: f64,
}

impl RobotSpec {
    pub fn new(wheel_base: f64, ticks_to_distance: f64) -> LaneResult<Self> {
        let spec = Self {
            wheel_base,
            ticks_to_distance,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Derive the tick scale from wheel radius and encoder resolution
    pub fn from_wheel(wheel_radius: f64, encoder_resolution: u32, wheel_base: f64) -> LaneResult<Self> {
        if encoder_resolution == 0 {
            return Err(LaneError::config("encoder_resolution must be non-zero"));
        }
        Self::new(
            wheel_base,
            2.0 * PI * wheel_radius / encoder_resolution as f64,
        )
    }

    pub fn validate(&self) -> LaneResult<()> {
        if !(self.wheel_base.is_finite() && self.wheel_base > 0.0) {
            return Err(LaneError::config(format!(
                "wheel_base must be positive, got {}",
                self.wheel_base
            )));
        }
        if !(self.ticks_to_distance.is_finite() && self.ticks_to_distance > 0.0) {
            return Err(LaneError::config(format!(
                "ticks_to_distance must be positive, got {}",
                self.ticks_to_distance
            )));
        }
        Ok(())
    }

    /// Linear and angular displacement for one cycle of tick deltas
    ///
    /// # Returns
    /// (v, w): forward displacement (m) and heading change (rad)
    pub fn tick_velocities(&self, ticks: WheelTicks) -> (f64, f64) {
        let left = ticks.left as f64 * self.ticks_to_distance;
        let right = ticks.right as f64 * self.ticks_to_distance;
        forward_kinematics(left, right, self.wheel_base)
    }
}

impl Default for RobotSpec {
    fn default() -> Self {
        Self {
            wheel_base: 0.1,
            ticks_to_distance: 2.0 * PI * 0.0318 / 135.0,
        }
    }
}

/// Wheel rotation since the previous encoder reading
///
/// # Arguments
/// * `ticks` - Current cumulative tick count
/// * `prev_ticks` - Previous cumulative tick count
/// * `resolution` - Ticks per full wheel revolution
///
/// # Returns
/// (rotation in radians, current ticks to store as the next `prev_ticks`)
pub fn wheel_rotation(ticks: i64, prev_ticks: i64, resolution: u32) -> (f64, i64) {
    let delta_ticks = (ticks - prev_ticks) as f64;
    let dphi = 2.0 * PI * delta_ticks / resolution as f64;
    (dphi, ticks)
}

fn forward_kinematics(left: f64, right: f64, wheel_base: f64) -> (f64, f64) {
    let linear = (left + right) / 2.0;
    let angular = (right - left) / wheel_base;
    (linear, angular)
}

/// Differential Drive Kinematics
pub struct DifferentialDrive {
    wheel_base: f64,   // Distance between wheels (m)
    wheel_radius: f64, // Wheel radius (m)
}

impl DifferentialDrive {
    /// Create new differential drive kinematics
    ///
    /// # Arguments
    /// * `wheel_base` - Distance between left and right wheels (meters)
    /// * `wheel_radius` - Radius of wheels (meters)
    pub fn new(wheel_base: f64, wheel_radius: f64) -> Self {
        Self {
            wheel_base,
            wheel_radius,
        }
    }

    /// Dead-reckoning pose update from wheel rotations
    ///
    /// Integrates along the chord at the midpoint heading.
    ///
    /// # Arguments
    /// * `prev` - Previous pose estimate
    /// * `dphi_left` - Left wheel rotation (rad)
    /// * `dphi_right` - Right wheel rotation (rad)
    pub fn pose_estimation(&self, prev: Pose2D, dphi_left: f64, dphi_right: f64) -> Pose2D {
        let d_left = self.wheel_radius * dphi_left;
        let d_right = self.wheel_radius * dphi_right;

        let delta_theta = (d_right - d_left) / self.wheel_base;
        let distance = (d_right + d_left) / 2.0;
        let heading = prev.theta + delta_theta / 2.0;

        Pose2D {
            x: prev.x + distance * heading.cos(),
            y: prev.y + distance * heading.sin(),
            theta: prev.theta + delta_theta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wheel_rotation() {
        let (dphi, ticks) = wheel_rotation(170, 35, 135);
        assert_relative_eq!(dphi, 2.0 * PI);
        assert_eq!(ticks, 170);

        let (dphi, _) = wheel_rotation(0, 135, 135);
        assert_relative_eq!(dphi, -2.0 * PI);
    }

    #[test]
    fn test_tick_velocities_straight() {
        let robot = RobotSpec::new(0.1, 0.01).unwrap();
        let (v, w) = robot.tick_velocities(WheelTicks::new(10, 10));

        assert_relative_eq!(v, 0.1);
        assert_eq!(w, 0.0);
    }

    #[test]
    fn test_tick_velocities_spin() {
        let robot = RobotSpec::new(0.1, 0.01).unwrap();
        let (v, w) = robot.tick_velocities(WheelTicks::new(-5, 5));

        assert_eq!(v, 0.0);
        assert_relative_eq!(w, 1.0);
    }

    #[test]
    fn test_robot_spec_from_wheel() {
        let robot = RobotSpec::from_wheel(0.0318, 135, 0.1).unwrap();
        assert_relative_eq!(robot.ticks_to_distance, 2.0 * PI * 0.0318 / 135.0);

        assert!(RobotSpec::from_wheel(0.0318, 0, 0.1).is_err());
        assert!(RobotSpec::new(0.0, 0.01).is_err());
        assert!(RobotSpec::new(0.1, -0.01).is_err());
    }

    #[test]
    fn test_pose_estimation_straight() {
        let dd = DifferentialDrive::new(0.1, 0.05);
        let pose = dd.pose_estimation(Pose2D::default(), 2.0, 2.0);

        assert_relative_eq!(pose.x, 0.1);
        assert_relative_eq!(pose.y, 0.0);
        assert_relative_eq!(pose.theta, 0.0);
    }

    #[test]
    fn test_pose_estimation_in_place() {
        let dd = DifferentialDrive::new(0.1, 0.05);
        let pose = dd.pose_estimation(Pose2D::new(1.0, 2.0, 0.5), -1.0, 1.0);

        assert_relative_eq!(pose.x, 1.0);
        assert_relative_eq!(pose.y, 2.0);
        assert_relative_eq!(pose.theta, 0.5 + 1.0);
    }

    #[test]
    fn test_pose_estimation_uses_midpoint_heading() {
        let dd = DifferentialDrive::new(0.1, 0.05);
        let pose = dd.pose_estimation(Pose2D::default(), 1.0, 3.0);

        // dL = 0.05, dR = 0.15, dtheta = 1.0, d = 0.1
        assert_relative_eq!(pose.theta, 1.0);
        assert_relative_eq!(pose.x, 0.1 * 0.5_f64.cos());
        assert_relative_eq!(pose.y, 0.1 * 0.5_f64.sin());
    }
}
