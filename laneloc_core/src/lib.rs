//! # laneloc Core
//!
//! Shared building blocks for the laneloc lane localization stack:
//!
//! - **Errors**: the [`LaneError`] taxonomy and the [`LaneResult`] alias
//! - **Config**: loading serde configuration from YAML, TOML or JSON files
//!
//! ## Quick Start
//!
//! ```rust
//! use laneloc_core::{LaneError, LaneResult};
//!
//! fn check_step(delta: f64) -> LaneResult<f64> {
//!     if delta <= 0.0 {
//!         return Err(LaneError::config("step must be positive"));
//!     }
//!     Ok(delta)
//! }
//!
//! assert!(check_step(0.02).is_ok());
//! ```

pub mod config;
pub mod error;

// Re-export commonly used types for easy access
pub use config::{load_config, parse_config, save_yaml, ConfigFormat};
pub use error::{LaneError, LaneResult};
