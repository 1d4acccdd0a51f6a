//! Visual Lane Servoing
//!
//! Braitenberg-like steering from pre-segmented lane marking masks. Each
//! pixel of the left (yellow) mask pushes the robot right in proportion to
//! its column; each pixel of the right (white) mask pushes it left.
//!
//! # Features
//!
//! - Column-proportional steer matrices for both markings
//! - Steering command as a weighted mask sum
//!
//! # Example
//!
//! ```rust
//! use laneloc_library::algorithms::lane_servoing::compute_steering;
//! use ndarray::Array2;
//!
//! // Left marking seen only on the right half of the image
//! let mut left = Array2::<f64>::zeros((2, 4));
//! left[[0, 3]] = 1.0;
//! let right = Array2::<f64>::zeros((2, 4));
//!
//! let steering = compute_steering(&left, &right).unwrap();
//! assert!(steering < 0.0);  // turn right
//! ```

use laneloc_core::{LaneError, LaneResult};
use ndarray::Array2;

/// Steer weights for the left marking mask: `-j / cols`
pub fn steer_matrix_left(shape: (usize, usize)) -> Array2<f64> {
    let cols = shape.1 as f64;
    Array2::from_shape_fn(shape, |(_, j)| -(j as f64) / cols)
}

/// Steer weights for the right marking mask: `j / cols`
pub fn steer_matrix_right(shape: (usize, usize)) -> Array2<f64> {
    let cols = shape.1 as f64;
    Array2::from_shape_fn(shape, |(_, j)| j as f64 / cols)
}

/// Angular rate command from the two marking masks
///
/// # Errors
/// `ShapeMismatch` if the masks differ in shape.
pub fn compute_steering(mask_left: &Array2<f64>, mask_right: &Array2<f64>) -> LaneResult<f64> {
    if mask_left.dim() != mask_right.dim() {
        return Err(LaneError::ShapeMismatch {
            expected: mask_left.dim(),
            actual: mask_right.dim(),
        });
    }

    let shape = mask_left.dim();
    let left = (&steer_matrix_left(shape) * mask_left).sum();
    let right = (&steer_matrix_right(shape) * mask_right).sum();
    Ok(left + right)
}
