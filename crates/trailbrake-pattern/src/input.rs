//! Two-channel pedal value shared by reference queries and scoring.

use serde::{Deserialize, Serialize};

use crate::pattern::{PEDAL_MAX, PEDAL_MIN};

/// Throttle and brake position in percent.
///
/// Used both for reference values coming out of a
/// [`ReferenceSignal`](crate::ReferenceSignal) and for live player input.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PedalInput {
    /// Throttle position, nominally `[0, 100]`.
    pub throttle: f64,
    /// Brake position, nominally `[0, 100]`.
    pub brake: f64,
}

impl PedalInput {
    /// Both pedals released.
    pub const ZERO: Self = Self {
        throttle: 0.0,
        brake: 0.0,
    };

    /// Create a new input.
    pub const fn new(throttle: f64, brake: f64) -> Self {
        Self { throttle, brake }
    }

    /// Clamp both channels to `[0, 100]`.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            throttle: self.throttle.clamp(PEDAL_MIN, PEDAL_MAX),
            brake: self.brake.clamp(PEDAL_MIN, PEDAL_MAX),
        }
    }

    /// Linear interpolation towards `other` by `fraction`.
    #[must_use]
    pub fn lerp(self, other: Self, fraction: f64) -> Self {
        Self {
            throttle: self.throttle + (other.throttle - self.throttle) * fraction,
            brake: self.brake + (other.brake - self.brake) * fraction,
        }
    }
}
