//! Error types shared by every laneloc crate
//!
//! Conditions the filter recovers from on its own (mass dropped at the grid
//! boundary, a smoothing pass that sums to zero, a cycle without votes) are
//! not errors and never show up here.

use thiserror::Error;

/// Main error type for laneloc
#[derive(Debug, Error)]
pub enum LaneError {
    /// Configuration rejected at construction time
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Predicted belief and measurement likelihood share no support, so the
    /// Bayes product cannot be normalized
    #[error("Filter diverged: belief and measurement likelihood have disjoint support ({votes} votes)")]
    DisjointSupport { votes: usize },

    /// Two arrays that must agree in shape do not
    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// Bad argument to a pure numeric routine
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the workspace
pub type LaneResult<T> = Result<T, LaneError>;

impl LaneError {
    /// Build an [`LaneError::InvalidConfig`] from anything displayable
    pub fn config<S: Into<String>>(msg: S) -> Self {
        LaneError::InvalidConfig(msg.into())
    }

    /// Build an [`LaneError::InvalidInput`] from anything displayable
    pub fn input<S: Into<String>>(msg: S) -> Self {
        LaneError::InvalidInput(msg.into())
    }

    /// True for the one failure a running filter can hit after construction
    pub fn is_divergence(&self) -> bool {
        matches!(self, LaneError::DisjointSupport { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = LaneError::config("delta_d must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: delta_d must be positive"
        );

        let err = LaneError::ShapeMismatch {
            expected: (3, 3),
            actual: (2, 4),
        };
        assert_eq!(err.to_string(), "Shape mismatch: expected (3, 3), got (2, 4)");
    }

    #[test]
    fn test_divergence_flag() {
        assert!(LaneError::DisjointSupport { votes: 2 }.is_divergence());
        assert!(!LaneError::input("dt").is_divergence());
    }

    #[test]
    fn test_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: LaneError = io.into();
        assert!(matches!(err, LaneError::Io(_)));
    }
}
