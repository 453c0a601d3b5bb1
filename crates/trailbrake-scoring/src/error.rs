//! Errors for session records coming back from persistence.
//!
//! Scoring itself never fails; only records handed in from outside are
//! checked.

use thiserror::Error;

/// A session record that cannot be trusted for replay.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    /// The record text is not a well-formed session record.
    #[error("Malformed session record: {0}")]
    Malformed(String),

    /// The stored tolerance cannot grade anything.
    #[error("Invalid tolerance {0}: must be a positive finite number")]
    InvalidTolerance(f64),

    /// Sample times go backwards.
    #[error("samples[{index}] time {time} is before the previous sample at {previous}")]
    TimeWentBackwards {
        /// Offending sample index.
        index: usize,
        /// Time of the previous sample.
        previous: f64,
        /// Time of the offending sample.
        time: f64,
    },

    /// A sample carries a non-finite number.
    #[error("samples[{0}] contains a non-finite value")]
    NonFiniteSample(usize),
}

/// Result alias for record operations.
pub type RecordResult<T> = Result<T, RecordError>;

impl From<serde_json::Error> for RecordError {
    fn from(err: serde_json::Error) -> Self {
        RecordError::Malformed(err.to_string())
    }
}
