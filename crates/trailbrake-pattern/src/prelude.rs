//! Commonly used pattern types.
//!
//! # Example
//!
//! ```
//! use trailbrake_pattern::prelude::*;
//!
//! let library = PatternLibrary::builtin();
//! if let Some((_, pattern)) = library.resolve(DEFAULT_PATTERN_ID) {
//!     let signal = ReferenceSignal::generate(pattern);
//!     let reference: PedalInput = signal.query_at(1.0);
//!     assert!(reference.throttle <= 100.0);
//! }
//! ```

pub use crate::active::ActivePattern;
pub use crate::error::{PatternError, PatternResult};
pub use crate::input::PedalInput;
pub use crate::json::{parse_pattern, to_json_pretty};
pub use crate::library::{DEFAULT_PATTERN_ID, PatternLibrary};
pub use crate::pattern::{Pattern, Segment};
pub use crate::signal::ReferenceSignal;
