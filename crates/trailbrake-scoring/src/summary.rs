//! Derived score views.

use serde::{Deserialize, Serialize};

use crate::grade::Grade;

/// Rolling on-screen readout over the most recent frames.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSnapshot {
    /// Mean weighted deviation.
    pub mean_deviation: f64,
    /// Mean timing signal; negative leans early, positive leans late.
    pub timing_offset: f64,
    /// Smoothness in `[0, 100]`.
    pub smoothness: f64,
    /// Grade of `mean_deviation`.
    pub grade: Grade,
}

/// End-of-session grading over every recorded frame.
///
/// This is the shape handed to persistence alongside the raw samples.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    /// Mean weighted deviation.
    pub mean_deviation: f64,
    /// Mean timing signal.
    pub timing_offset: f64,
    /// Smoothness in `[0, 100]`.
    pub smoothness: f64,
    /// Grade of `mean_deviation`.
    pub grade: Grade,
    /// Median weighted deviation.
    pub p50_deviation: f64,
    /// 95th percentile weighted deviation.
    pub p95_deviation: f64,
    /// Number of frames scored.
    pub total_samples: usize,
}

impl SessionSummary {
    /// The summary fields shared with the live readout.
    pub fn snapshot(&self) -> ScoreSnapshot {
        ScoreSnapshot {
            mean_deviation: self.mean_deviation,
            timing_offset: self.timing_offset,
            smoothness: self.smoothness,
            grade: self.grade,
        }
    }

    /// True when no frame was ever scored.
    pub fn is_empty(&self) -> bool {
        self.total_samples == 0
    }
}
