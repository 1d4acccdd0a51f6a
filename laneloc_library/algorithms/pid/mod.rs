//! Heading PID Controller
//!
//! Steers a differential drive robot toward a reference heading at a fixed
//! forward speed.
//!
//! # Features
//!
//! - Proportional, integral, and derivative terms on heading error
//! - Stateless `compute`: the caller carries the previous error and integral
//! - Serializable gains with Duckietown defaults (Kp=1, Ki=0.1, Kd=0.01)
//!
//! # Example
//!
//! ```rust
//! use laneloc_library::algorithms::pid::HeadingPid;
//!
//! let pid = HeadingPid::default();
//!
//! // v0, theta_ref, theta_hat, prev_e, prev_int, dt
//! let (v0, omega, e, e_int) = pid.compute(0.2, 0.5, 0.0, 0.0, 0.0, 0.1).unwrap();
//! assert_eq!(v0, 0.2);
//! assert!(omega > 0.0);  // turn left toward the reference
//!
//! // Next cycle carries the error state forward
//! let (_, omega, _, _) = pid.compute(0.2, 0.5, 0.3, e, e_int, 0.1).unwrap();
//! assert!(omega > 0.0);
//! ```

use laneloc_core::{LaneError, LaneResult};
use serde::{Deserialize, Serialize};

/// Heading PID gains
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadingPid {
    kp: f64, // Proportional gain
    ki: f64, // Integral gain
    kd: f64, // Derivative gain
}

impl HeadingPid {
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd }
    }

    /// Compute the angular velocity command
    ///
    /// # Arguments
    /// * `v0` - Forward speed, passed through unchanged
    /// * `theta_ref` - Reference heading (rad)
    /// * `theta_hat` - Estimated heading (rad)
    /// * `prev_e` - Heading error from the previous call
    /// * `prev_int` - Integral term from the previous call
    /// * `dt` - Time since the previous call (s)
    ///
    /// # Returns
    /// (v0, omega, e, e_int). Feed `e` and `e_int` back as `prev_e` and
    /// `prev_int` on the next call.
    ///
    /// # Errors
    /// `InvalidInput` if `dt` is not a positive finite number.
    pub fn compute(
        &self,
        v0: f64,
        theta_ref: f64,
        theta_hat: f64,
        prev_e: f64,
        prev_int: f64,
        dt: f64,
    ) -> LaneResult<(f64, f64, f64, f64)> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(LaneError::input(format!("pid time step must be positive, got {dt}")));
        }

        let e = theta_ref - theta_hat;
        let e_int = prev_int + e * dt;
        let e_deriv = (e - prev_e) / dt;

        let omega = self.kp * e + self.ki * e_int + self.kd * e_deriv;
        Ok((v0, omega, e, e_int))
    }

    /// Get current gains
    pub fn get_gains(&self) -> (f64, f64, f64) {
        (self.kp, self.ki, self.kd)
    }
}

impl Default for HeadingPid {
    fn default() -> Self {
        Self::new(1.0, 0.1, 0.01)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_proportional_only() {
        let pid = HeadingPid::new(2.0, 0.0, 0.0);

        let (_, omega, e, _) = pid.compute(0.2, 0.3, 0.1, 0.2, 0.0, 0.1).unwrap();
        assert_relative_eq!(e, 0.2);
        assert_relative_eq!(omega, 0.4);
    }

    #[test]
    fn test_default_gains() {
        let pid = HeadingPid::default();
        assert_eq!(pid.get_gains(), (1.0, 0.1, 0.01));

        // e = 0.5, e_int = 0.1 + 0.05, e_deriv = (0.5 - 0.3) / 0.1
        let (v0, omega, e, e_int) = pid.compute(0.3, 0.5, 0.0, 0.3, 0.1, 0.1).unwrap();
        assert_eq!(v0, 0.3);
        assert_relative_eq!(e, 0.5);
        assert_relative_eq!(e_int, 0.15, epsilon = 1e-12);
        assert_relative_eq!(omega, 0.5 + 0.1 * 0.15 + 0.01 * 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_integral_accumulation() {
        let pid = HeadingPid::new(0.0, 1.0, 0.0);

        let (mut e, mut e_int) = (0.0, 0.0);
        for _ in 0..10 {
            let (_, _, e_new, e_int_new) = pid.compute(0.0, 1.0, 0.0, e, e_int, 0.1).unwrap();
            e = e_new;
            e_int = e_int_new;
        }

        assert_relative_eq!(e_int, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_negative_error() {
        let pid = HeadingPid::new(1.0, 0.0, 0.0);

        let (_, omega, _, _) = pid.compute(0.2, -0.2, 0.1, 0.0, 0.0, 0.1).unwrap();
        assert!(omega < 0.0);
    }

    #[test]
    fn test_heading_converges() {
        let pid = HeadingPid::default();
        let dt = 0.05;

        let mut theta = 0.0;
        let (mut e, mut e_int) = (0.0, 0.0);
        for _ in 0..400 {
            let (_, omega, e_new, e_int_new) = pid.compute(0.2, 1.0, theta, e, e_int, dt).unwrap();
            theta += omega * dt;
            e = e_new;
            e_int = e_int_new;
        }

        assert!((theta - 1.0).abs() < 0.05);
    }

    #[test]
    fn test_rejects_bad_dt() {
        let pid = HeadingPid::default();

        for dt in [0.0, -0.1, f64::NAN] {
            let err = pid.compute(0.2, 0.0, 0.0, 0.0, 0.0, dt).unwrap_err();
            assert!(matches!(err, LaneError::InvalidInput(_)));
        }
    }
}
