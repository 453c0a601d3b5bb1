//! Scripted driver for `session simulate`

use trailbrake_pattern::{ActivePattern, PedalInput, SAMPLE_RATE_HZ};
use trailbrake_scoring::ScoringEngine;
use tracing::{debug, trace};

use crate::config::SimulationConfig;

/// A deterministic stand-in for a human on the pedals.
///
/// Reads the reference `lag` seconds late, scales it by `gain` and adds a
/// fixed sinusoidal wobble of amplitude `jitter`. Same settings, same trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyntheticDriver {
    pub lag: f64,
    pub gain: f64,
    pub jitter: f64,
}

impl From<SimulationConfig> for SyntheticDriver {
    fn from(config: SimulationConfig) -> Self {
        Self {
            lag: config.lag_seconds,
            gain: config.gain,
            jitter: config.jitter,
        }
    }
}

impl SyntheticDriver {
    /// Pedal positions at `time`.
    pub fn press(&self, active: &ActivePattern, time: f64) -> PedalInput {
        let seen = active.query_at(time - self.lag);
        PedalInput::new(
            seen.throttle * self.gain + (time * 11.0).sin() * self.jitter,
            seen.brake * self.gain + (time * 7.0).cos() * self.jitter,
        )
        .clamped()
    }

    /// Drive one full run of `active` through a fresh engine at 60 Hz.
    pub fn run(&self, active: &ActivePattern, tolerance: f64) -> ScoringEngine {
        let mut engine = ScoringEngine::new();
        let ticks = active.signal().len();

        for tick in 0..ticks {
            let time = tick as f64 / SAMPLE_RATE_HZ;
            let reference = active.query_at(time);
            let deviation = engine.add_sample(time, self.press(active, time), reference, tolerance);
            trace!(time, deviation, "Scored frame");

            if tick % 60 == 59 {
                let live = engine.current_scores();
                debug!(
                    time,
                    mean_deviation = live.mean_deviation,
                    timing_offset = live.timing_offset,
                    smoothness = live.smoothness,
                    grade = %live.grade,
                    "Live scores"
                );
            }
        }

        engine
    }
}
