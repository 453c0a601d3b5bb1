//! Pedal Trace Scoring for Trailbrake
//!
//! This crate compares live throttle/brake input against a reference trace and
//! turns the stream of frames into metrics a driver can act on.
//!
//! # Overview
//!
//! - **Weighted deviation**: per-frame error whose meaning depends on which
//!   reference channel is active (see [`deviation`])
//! - **Timing**: a coarse early/late braking signal
//! - **Smoothness**: derived from how fast the player's pedals move, not from
//!   accuracy
//! - **Live readout**: means over the most recent [`LIVE_WINDOW`] frames
//! - **Session summary**: the same metrics over every frame, plus p50/p95
//!   deviation and a letter [`Grade`]
//! - **Session records**: summary plus raw frames, replayable through the same
//!   scoring path
//!
//! # Example
//!
//! ```
//! use trailbrake_pattern::PedalInput;
//! use trailbrake_scoring::{Grade, ScoringEngine};
//!
//! let mut engine = ScoringEngine::new();
//! let reference = PedalInput::new(0.0, 80.0);
//! for tick in 0..60 {
//!     let time = f64::from(tick) / 60.0;
//!     engine.add_sample(time, PedalInput::new(0.0, 78.0), reference, 10.0);
//! }
//!
//! let summary = engine.session_summary(10.0);
//! assert_eq!(summary.total_samples, 60);
//! assert_eq!(summary.grade, Grade::APlus);
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod deviation;
pub mod engine;
pub mod error;
pub mod grade;
pub mod prelude;
pub mod sample;
pub mod session;
pub mod stats;
pub mod summary;

pub use deviation::{
    ACTIVE_THRESHOLD, TIMING_ERROR_MAGNITUDE, is_active, timing_error, weighted_deviation,
};
pub use engine::{EngineState, LIVE_WINDOW, ScoringEngine};
pub use error::{RecordError, RecordResult};
pub use grade::Grade;
pub use sample::Sample;
pub use session::SessionRecord;
pub use stats::{SMOOTHNESS_DIVISOR, mean, percentile, smoothness};
pub use summary::{ScoreSnapshot, SessionSummary};
