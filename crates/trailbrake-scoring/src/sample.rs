//! Scored frames.

use serde::{Deserialize, Serialize};
use trailbrake_pattern::PedalInput;

/// One scored frame.
///
/// Never mutated after the engine creates it. Serializes with camelCase field
/// names so recorded sessions can be fed back through
/// [`ScoringEngine::replay`](crate::ScoringEngine::replay).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    /// Session time in seconds.
    pub time: f64,
    /// What the player was pressing.
    pub player_input: PedalInput,
    /// What the reference asked for.
    pub reference_input: PedalInput,
    /// Context-weighted deviation of this frame.
    pub weighted_deviation: f64,
}
