//! Session records handed to and received from persistence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::ScoringEngine;
use crate::error::{RecordError, RecordResult};
use crate::sample::Sample;
use crate::summary::SessionSummary;

/// A finished (or interrupted) session: its summary plus every raw frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Unique record identifier.
    pub id: Uuid,
    /// Display name of the pattern the session ran against.
    pub pattern_name: String,
    /// When the record was taken.
    pub recorded_at: DateTime<Utc>,
    /// Tolerance the summary was graded with.
    pub tolerance: f64,
    /// Summary at record time.
    pub summary: SessionSummary,
    /// Every scored frame, oldest first.
    pub samples: Vec<Sample>,
}

impl SessionRecord {
    /// Snapshot `engine` into a new record.
    pub fn new(pattern_name: impl Into<String>, tolerance: f64, engine: &ScoringEngine) -> Self {
        Self {
            id: Uuid::new_v4(),
            pattern_name: pattern_name.into(),
            recorded_at: Utc::now(),
            tolerance,
            summary: engine.session_summary(tolerance),
            samples: engine.samples().to_vec(),
        }
    }

    /// Replay the stored frames and grade them again with the stored tolerance.
    pub fn rescore(&self) -> SessionSummary {
        self.rescore_with(self.tolerance)
    }

    /// Replay the stored frames and grade them with `tolerance`.
    pub fn rescore_with(&self, tolerance: f64) -> SessionSummary {
        ScoringEngine::replay(&self.samples, tolerance).session_summary(tolerance)
    }

    /// True if replaying the frames reproduces the stored summary.
    pub fn is_consistent(&self) -> bool {
        self.rescore() == self.summary
    }

    /// Check that the record can be replayed meaningfully.
    ///
    /// # Errors
    ///
    /// - [`RecordError::InvalidTolerance`] for a non-positive or non-finite
    ///   tolerance
    /// - [`RecordError::NonFiniteSample`] for a NaN or infinite number in a frame
    /// - [`RecordError::TimeWentBackwards`] for frames out of time order
    pub fn validate(&self) -> RecordResult<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(RecordError::InvalidTolerance(self.tolerance));
        }

        let mut previous: Option<f64> = None;
        for (index, sample) in self.samples.iter().enumerate() {
            let values = [
                sample.time,
                sample.player_input.throttle,
                sample.player_input.brake,
                sample.reference_input.throttle,
                sample.reference_input.brake,
            ];
            if !values.iter().all(|value| value.is_finite()) {
                return Err(RecordError::NonFiniteSample(index));
            }
            if let Some(previous) = previous
                && sample.time < previous
            {
                return Err(RecordError::TimeWentBackwards {
                    index,
                    previous,
                    time: sample.time,
                });
            }
            previous = Some(sample.time);
        }

        Ok(())
    }

    /// Parse and validate a record from JSON text.
    ///
    /// # Errors
    ///
    /// [`RecordError::Malformed`] for text that is not a record, otherwise
    /// whatever [`validate`](Self::validate) reports.
    pub fn from_json(text: &str) -> RecordResult<Self> {
        let record: Self = serde_json::from_str(text)?;
        record.validate()?;
        Ok(record)
    }

    /// Pretty JSON form.
    ///
    /// # Errors
    ///
    /// [`RecordError::Malformed`] if serialization fails.
    pub fn to_json_pretty(&self) -> RecordResult<String> {
        serde_json::to_string_pretty(self).map_err(RecordError::from)
    }
}
