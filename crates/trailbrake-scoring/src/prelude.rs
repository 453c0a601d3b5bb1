//! Commonly used scoring types.
//!
//! ```
//! use trailbrake_scoring::prelude::*;
//!
//! let engine = ScoringEngine::new();
//! assert_eq!(engine.state(), EngineState::Idle);
//! assert_eq!(engine.session_summary(15.0).grade, Grade::NotAvailable);
//! ```

pub use crate::engine::{EngineState, ScoringEngine};
pub use crate::grade::Grade;
pub use crate::sample::Sample;
pub use crate::session::SessionRecord;
pub use crate::summary::{ScoreSnapshot, SessionSummary};
