//! Braitenberg Vehicle Weights
//!
//! Per-pixel motor weights for a Braitenberg-style reactive controller: each
//! motor command is the sum of a detection mask weighted by its matrix.
//!
//! # Example
//!
//! ```rust
//! use laneloc_library::algorithms::braitenberg::{motor_left_matrix, motor_right_matrix};
//! use ndarray::Array2;
//!
//! let mask = Array2::<f32>::ones((4, 6));
//! let left = (&motor_left_matrix((4, 6)) * &mask).sum();
//! let right = (&motor_right_matrix((4, 6)) * &mask).sum();
//! assert_eq!(left, right);
//! ```

use ndarray::Array2;

/// Left motor weights: 1.0 on the top half of the image, 0.5 below
///
/// For odd row counts the middle row belongs to the bottom half.
pub fn motor_left_matrix(shape: (usize, usize)) -> Array2<f32> {
    split_rows(shape, 1.0, 0.5)
}

/// Right motor weights: 0.5 on the top half of the image, 1.0 below
pub fn motor_right_matrix(shape: (usize, usize)) -> Array2<f32> {
    split_rows(shape, 0.5, 1.0)
}

fn split_rows(shape: (usize, usize), top: f32, bottom: f32) -> Array2<f32> {
    let half = shape.0 / 2;
    Array2::from_shape_fn(shape, |(i, _)| if i < half { top } else { bottom })
}
