//! # laneloc
//!
//! Lane localization for differential drive robots: a discrete Bayes filter
//! over lateral offset and heading error, fed by wheel encoders and detected
//! lane marking segments.
//!
//! ## Quick Start
//!
//! ```rust
//! use laneloc::prelude::*;
//!
//! let mut filter = LaneFilter::new(LaneFilterConfig::default())?;
//!
//! let segments = [Segment::from_coords(0.2, -0.1, 0.1, -0.1, SegmentColor::RightMarking)];
//! let estimate = filter.step(WheelTicks::new(10, 10), &segments)?;
//! println!("d = {:.3}, phi = {:.3}", estimate.d, estimate.phi);
//! # Ok::<(), LaneError>(())
//! ```
//!
//! ## Features
//!
//! - **Histogram filter** with Gaussian prior, odometry prediction and segment voting
//! - **Config files** in YAML, TOML or JSON
//! - **Replay tool** (`laneloc_replay`) for recorded detection logs
//! - **Controllers** for heading PID and visual lane servoing

// Re-export core components (avoiding conflicts)
pub use laneloc_core::{self, *};

// Re-export standard library with alias
pub use laneloc_library as library;

pub mod replay;

/// The laneloc prelude - everything you need to get started
pub mod prelude {
    // Filter and its configuration
    pub use laneloc_library::prelude::*;

    // Error and config types
    pub use laneloc_core::{load_config, LaneError, LaneResult};

    // Common traits
    pub use serde::{Deserialize, Serialize};

    // Re-export anyhow for error handling
    pub use anyhow::{anyhow, bail, ensure, Context, Result as AnyResult};
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get laneloc version
pub fn version() -> &'static str {
    VERSION
}
