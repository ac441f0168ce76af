#![warn(missing_docs)]

//! # Step-Test PID Tuning Library
//!
//! This library computes PID controller gains from an open-loop step test, using the empirical
//! power-law correlations `a * (dead_time / time_constant)^b` tabulated for load-change and
//! setpoint-change tuning.
//!
//! ## Features
//!
//! - Estimates first-order-plus-dead-time dynamics from the 25% and 75% crossing times of a
//!   step response.
//! - Tunes P, PI and PID controllers for load changes, and PI and PID controllers for setpoint
//!   changes. Unsupported combinations are reported, never silently zeroed.
//! - Reports gains in standard units (sec/repeat, sec) and in Rockwell units (min/repeat, min).
//! - The tuning computation is **functionally pure** and generic over `f32` and `f64`.
//! - Reduces sampled step-response traces to the timestamps the correlations need.
//!
//! ## Usage
//!
//! ### Tuning from step-test timestamps
//!
//! ```rust
//! use step_tune::correlation::{ControllerStructure, TuningObjective};
//! use step_tune::process::{StepTestBuilder, StepTimes};
//! use step_tune::tuning::compute;
//!
//! let measurement = StepTestBuilder::default()
//!     .scan_time(0.01)
//!     .delta_pv(0.045)
//!     .delta_mv(0.08333)
//!     .hysteresis(0.0447)
//!     .times(StepTimes::new(0.0, 0.21, 0.63))
//!     .build()
//!     .expect("Invalid step test");
//!
//! let result = compute(
//!     TuningObjective::SetpointChange,
//!     ControllerStructure::PID,
//!     &measurement,
//! )
//! .expect("Unsupported configuration");
//!
//! let standard = result.standard();
//! let rockwell = result.rockwell();
//! assert_eq!(standard.p_gain, rockwell.p_gain);
//! ```
//!
//! ### Unsupported configurations
//!
//! ```rust
//! use step_tune::correlation::{ControllerStructure, TuningObjective};
//! use step_tune::process::{StepTestMeasurement, StepTimes};
//! use step_tune::tuning::{compute, TuningError};
//!
//! let times = StepTimes::new(0.0, 0.21, 0.63);
//! let measurement = StepTestMeasurement::new(0.01, 0.045, 0.08333, 0.0, times);
//!
//! assert_eq!(
//!     compute(TuningObjective::SetpointChange, ControllerStructure::P, &measurement),
//!     Err(TuningError::UnsupportedConfiguration {
//!         objective: TuningObjective::SetpointChange,
//!         structure: ControllerStructure::P,
//!     })
//! );
//! ```
//!
//! ### Reducing a recorded trace
//!
//! ```rust
//! use step_tune::trace;
//!
//! let samples = [(0.0, 0.0), (1.0, 0.0), (2.0, 0.5), (3.0, 1.0), (4.0, 1.0)];
//! let reduced = trace::reduce(1.0, &samples).expect("Unusable trace");
//!
//! assert_eq!(reduced.times.t25, 1.5);
//! assert_eq!(reduced.times.t75, 2.5);
//! assert_eq!(reduced.delta_pv, 1.0);
//! ```
//!
//! ## License
//!
//! MIT
#![no_std]

#[cfg(feature = "std")]
extern crate std;

/// Tuning objectives, controller structures and the correlation coefficient table.
pub mod correlation;

/// Step-test measurements and the process dynamics estimated from them.
pub mod process;

/// The gain computation.
pub mod tuning;

/// Reduction of sampled step responses to crossing timestamps.
pub mod trace;

/// Plain-text rendering of tuning results.
pub mod report;

#[doc(hidden)]
#[cfg(feature = "simulation")]
pub mod sim;

pub use correlation::{ControllerStructure, TuningObjective};
pub use process::{ProcessDynamics, StepTestMeasurement, StepTimes};
pub use tuning::{compute, PidGains, TuningError, TuningResult};

#[doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;
