//! Pedal Trace Patterns for Trailbrake
//!
//! This crate turns declarative throttle/brake exercises into dense reference
//! signals that a trainer scrolls past the driver.
//!
//! # Overview
//!
//! - **Pattern**: a named exercise made of time segments, each holding a
//!   start/end keyframe for throttle and for brake
//! - **Validation**: every externally supplied pattern is checked before use
//! - **Reference signal**: the pattern materialized at 60 Hz with ease-in-out
//!   keyframe interpolation, additive segment overlap and clamping to `[0, 100]`
//! - **Library**: built-in patterns keyed by identifier
//!
//! # Overlapping segments
//!
//! Segments may overlap in time. Their contributions are summed, which is how
//! trail braking (throttle lift while the brake is applied) is authored. Sums
//! outside `[0, 100]` are clamped; [`Pattern::authoring_warnings`] reports where
//! that clamping hides an authoring mistake, and where a segment boundary
//! tick is counted by both neighbours.
//!
//! # Example
//!
//! ```
//! use trailbrake_pattern::{Pattern, ReferenceSignal, Segment};
//!
//! let pattern = Pattern::new("Brake zone", 3.0)
//!     .with_segment(Segment::new(0.0, 1.0).throttle(100.0, 0.0))
//!     .with_segment(Segment::new(1.0, 3.0).brake(100.0, 0.0));
//! pattern.validate()?;
//!
//! let signal = ReferenceSignal::generate(&pattern);
//! assert_eq!(signal.len(), 180);
//!
//! let reference = signal.query_at(1.25);
//! assert!((0.0..=100.0).contains(&reference.brake));
//! # Ok::<(), trailbrake_pattern::PatternError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod active;
pub mod easing;
pub mod error;
pub mod input;
pub mod json;
pub mod library;
pub mod lint;
pub mod pattern;
pub mod prelude;
pub mod signal;

pub use active::ActivePattern;
pub use easing::{ease_in_out, interpolate};
pub use error::{PatternError, PatternResult};
pub use input::PedalInput;
pub use json::{parse_pattern, pattern_from_value, to_json, to_json_pretty};
pub use library::{BUILTIN_PATTERN_IDS, DEFAULT_PATTERN_ID, PatternLibrary};
pub use lint::{AuthoringWarning, Channel, WarningKind};
pub use pattern::{Keyframes, PEDAL_MAX, PEDAL_MIN, Pattern, Segment, TimeRange};
pub use signal::{ReferenceSample, ReferenceSignal, SAMPLE_RATE_HZ};
