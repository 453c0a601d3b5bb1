//! Convenience re-exports for common test utilities.
//!
//! ```rust,ignore
//! use trailbrake_test_helpers::prelude::*;
//! ```

pub use crate::must::{must, must_err, must_some, must_with};
pub use crate::{assert_close, assert_in_range, assert_pedal_range};

#[cfg(feature = "fixtures")]
pub use crate::fixtures::{
    brake_zone_json, brake_zone_pattern, drive, frame_time, lagging_driver, overlap_pattern,
    perfect_driver, stacked_brake_pattern,
};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;
