//! Pure computational algorithms for lane following
//!
//! This module contains pure algorithmic implementations with no I/O dependencies.
//! Each algorithm can be driven directly by a control loop or by the replay tool.
//!
//! # Architecture
//!
//! - **No I/O**: Algorithms contain only computation logic
//! - **Logging**: Recoverable anomalies go through the `log` facade
//! - **Errors**: Fallible operations return [`laneloc_core::LaneResult`]
//!
//! # Available Algorithms
//!
//! ## Localization
//! - **histogram_filter**: Discrete Bayes filter over lateral offset and heading error
//!
//! ## Kinematics
//! - **differential_drive**: Encoder ticks, displacement and dead reckoning
//!
//! ## Control
//! - **pid**: Heading PID controller
//! - **lane_servoing**: Steering from lane marking masks
//! - **braitenberg**: Reactive motor weight matrices

pub mod braitenberg;
pub mod differential_drive;
pub mod histogram_filter;
pub mod lane_servoing;
pub mod pid;
