//! The scoring engine.
//!
//! One engine belongs to one session. The driver calls
//! [`ScoringEngine::add_sample`] once per frame in increasing time order; the
//! engine keeps every frame so both the rolling readout and the end-of-session
//! summary can be derived from the same history.
//!
//! ```text
//!   Idle ──add_sample──▶ Accumulating ──add_sample──▶ Accumulating
//!    ▲                        │
//!    └──────── reset ─────────┘
//! ```
//!
//! There is no finished state. A session ends when the driver stops adding
//! samples, and a summary can be taken at any point.

use tracing::debug;
use trailbrake_pattern::PedalInput;

use crate::deviation::{timing_error, weighted_deviation};
use crate::grade::Grade;
use crate::sample::Sample;
use crate::stats::{mean, percentile, recent, smoothness};
use crate::summary::{ScoreSnapshot, SessionSummary};

/// Number of most recent frames behind the live readout (2 s at 60 Hz).
pub const LIVE_WINDOW: usize = 120;

/// Lifecycle of a [`ScoringEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineState {
    /// No samples since construction or the last reset.
    Idle,
    /// At least one sample recorded.
    Accumulating,
}

/// Accumulates scored frames for one session.
///
/// Numeric input is never rejected. Non-monotonic time only skips the
/// gradient for that frame; NaN input produces NaN scores rather than a panic.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    samples: Vec<Sample>,
    timing_errors: Vec<f64>,
    throttle_gradients: Vec<f64>,
    brake_gradients: Vec<f64>,
    current: ScoreSnapshot,
}

impl ScoringEngine {
    /// A fresh, idle engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Score one frame and return its weighted deviation.
    ///
    /// Also refreshes the live readout over the last [`LIVE_WINDOW`] frames,
    /// graded against `tolerance`.
    pub fn add_sample(
        &mut self,
        time: f64,
        player: PedalInput,
        reference: PedalInput,
        tolerance: f64,
    ) -> f64 {
        let deviation = weighted_deviation(player, reference);

        if let Some(previous) = self.samples.last() {
            let dt = time - previous.time;
            if dt > 0.0 {
                self.throttle_gradients
                    .push((player.throttle - previous.player_input.throttle).abs() / dt);
                self.brake_gradients
                    .push((player.brake - previous.player_input.brake).abs() / dt);
            }
        }

        self.timing_errors.push(timing_error(player, reference));
        self.samples.push(Sample {
            time,
            player_input: player,
            reference_input: reference,
            weighted_deviation: deviation,
        });
        self.current = self.live_snapshot(tolerance);

        deviation
    }

    /// The rolling readout as of the last [`add_sample`](Self::add_sample).
    pub fn current_scores(&self) -> ScoreSnapshot {
        self.current
    }

    /// Grade the whole session so far.
    ///
    /// Same formulas as the live readout, over every frame rather than the
    /// recent window, plus median and 95th percentile deviation. An idle
    /// engine returns zeros and [`Grade::NotAvailable`].
    pub fn session_summary(&self, tolerance: f64) -> SessionSummary {
        if self.samples.is_empty() {
            return SessionSummary::default();
        }

        let mut deviations: Vec<f64> = self
            .samples
            .iter()
            .map(|sample| sample.weighted_deviation)
            .collect();
        let mean_deviation = mean(&deviations);
        deviations.sort_by(f64::total_cmp);

        SessionSummary {
            mean_deviation,
            timing_offset: mean(&self.timing_errors),
            smoothness: smoothness(&self.throttle_gradients, &self.brake_gradients),
            grade: Grade::from_deviation(mean_deviation, tolerance),
            p50_deviation: percentile(&deviations, 0.50),
            p95_deviation: percentile(&deviations, 0.95),
            total_samples: self.samples.len(),
        }
    }

    /// Drop all history and return to [`EngineState::Idle`].
    pub fn reset(&mut self) {
        debug!(discarded = self.samples.len(), "Scoring engine reset");
        *self = Self::default();
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        if self.samples.is_empty() {
            EngineState::Idle
        } else {
            EngineState::Accumulating
        }
    }

    /// Every frame scored so far, oldest first.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of frames scored so far.
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Time of the most recent frame.
    pub fn last_time(&self) -> Option<f64> {
        self.samples.last().map(|sample| sample.time)
    }

    /// Build an engine by feeding recorded frames through
    /// [`add_sample`](Self::add_sample).
    ///
    /// Stored `weighted_deviation` values are ignored and recomputed, so a
    /// replayed session scores exactly like the live one did.
    pub fn replay<'a, I>(samples: I, tolerance: f64) -> Self
    where
        I: IntoIterator<Item = &'a Sample>,
    {
        let mut engine = Self::new();
        for sample in samples {
            engine.add_sample(
                sample.time,
                sample.player_input,
                sample.reference_input,
                tolerance,
            );
        }
        debug!(samples = engine.sample_count(), "Replayed session");
        engine
    }

    fn live_snapshot(&self, tolerance: f64) -> ScoreSnapshot {
        let window = recent(&self.samples, LIVE_WINDOW);
        let deviations: Vec<f64> = window
            .iter()
            .map(|sample| sample.weighted_deviation)
            .collect();
        let mean_deviation = mean(&deviations);

        ScoreSnapshot {
            mean_deviation,
            timing_offset: mean(recent(&self.timing_errors, LIVE_WINDOW)),
            smoothness: smoothness(
                recent(&self.throttle_gradients, LIVE_WINDOW),
                recent(&self.brake_gradients, LIVE_WINDOW),
            ),
            grade: Grade::from_deviation(mean_deviation, tolerance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TOLERANCE: f64 = 10.0;

    fn frame(tick: u32) -> f64 {
        f64::from(tick) / 60.0
    }

    #[test]
    fn test_fresh_engine_is_idle() {
        let engine = ScoringEngine::new();
        assert_eq!(engine.state(), EngineState::Idle);
        assert_eq!(engine.current_scores(), ScoreSnapshot::default());
        assert_eq!(engine.session_summary(TOLERANCE), SessionSummary::default());
        assert_eq!(engine.last_time(), None);
    }

    #[test]
    fn test_add_sample_returns_weighted_deviation() {
        let mut engine = ScoringEngine::new();
        let brake_zone = engine.add_sample(
            0.0,
            PedalInput::new(30.0, 50.0),
            PedalInput::new(0.0, 50.0),
            TOLERANCE,
        );
        assert_relative_eq!(brake_zone, 0.0);

        let coasting = engine.add_sample(
            frame(1),
            PedalInput::new(20.0, 0.0),
            PedalInput::new(5.0, 5.0),
            TOLERANCE,
        );
        assert_relative_eq!(coasting, 10.0);
        assert_eq!(engine.state(), EngineState::Accumulating);
        assert_eq!(engine.sample_count(), 2);
    }

    #[test]
    fn test_first_sample_has_full_smoothness() {
        let mut engine = ScoringEngine::new();
        engine.add_sample(0.0, PedalInput::new(80.0, 0.0), PedalInput::new(80.0, 0.0), TOLERANCE);
        assert_relative_eq!(engine.current_scores().smoothness, 100.0);
        assert_eq!(engine.current_scores().grade, Grade::APlus);
    }

    #[test]
    fn test_gradient_skipped_for_non_increasing_time() {
        let mut engine = ScoringEngine::new();
        engine.add_sample(1.0, PedalInput::ZERO, PedalInput::ZERO, TOLERANCE);
        engine.add_sample(1.0, PedalInput::new(100.0, 0.0), PedalInput::ZERO, TOLERANCE);
        engine.add_sample(0.5, PedalInput::ZERO, PedalInput::ZERO, TOLERANCE);
        assert_relative_eq!(engine.current_scores().smoothness, 100.0);
    }

    #[test]
    fn test_smoothness_from_gradients() {
        let mut engine = ScoringEngine::new();
        // Throttle climbs 1 % per 1/60 s: 60 %/s, brake still.
        for tick in 0..30 {
            let player = PedalInput::new(f64::from(tick), 0.0);
            engine.add_sample(frame(tick), player, player, TOLERANCE);
        }
        // Mean gradient (60 + 0) / 2 = 30, smoothness 100 - 30 / 5 = 94.
        assert_relative_eq!(engine.current_scores().smoothness, 94.0, epsilon = 1e-6);
    }

    #[test]
    fn test_timing_offset_mean() {
        let mut engine = ScoringEngine::new();
        let early = PedalInput::new(0.0, 80.0);
        engine.add_sample(0.0, early, PedalInput::ZERO, TOLERANCE);
        engine.add_sample(frame(1), PedalInput::ZERO, PedalInput::ZERO, TOLERANCE);
        assert_relative_eq!(engine.current_scores().timing_offset, -25.0);
    }

    #[test]
    fn test_live_window_forgets_old_frames() {
        let mut engine = ScoringEngine::new();
        let reference = PedalInput::new(50.0, 0.0);
        for tick in 0..60 {
            engine.add_sample(frame(tick), PedalInput::new(90.0, 0.0), reference, TOLERANCE);
        }
        for tick in 60..(60 + LIVE_WINDOW as u32) {
            engine.add_sample(frame(tick), reference, reference, TOLERANCE);
        }

        assert_relative_eq!(engine.current_scores().mean_deviation, 0.0);
        assert_eq!(engine.current_scores().grade, Grade::APlus);

        let summary = engine.session_summary(TOLERANCE);
        assert_relative_eq!(summary.mean_deviation, 40.0 * 60.0 / 180.0, epsilon = 1e-9);
        assert_eq!(summary.grade, Grade::D);
    }

    #[test]
    fn test_session_summary_percentiles() {
        let mut engine = ScoringEngine::new();
        let reference = PedalInput::new(50.0, 0.0);
        for tick in 0..100u32 {
            let player = PedalInput::new(50.0 + f64::from(tick % 20), 0.0);
            engine.add_sample(frame(tick), player, reference, TOLERANCE);
        }

        let summary = engine.session_summary(TOLERANCE);
        assert_eq!(summary.total_samples, 100);
        assert_relative_eq!(summary.mean_deviation, 9.5);
        assert_relative_eq!(summary.p50_deviation, 10.0);
        assert_relative_eq!(summary.p95_deviation, 19.0);
        assert_eq!(summary.grade, Grade::C);
    }

    #[test]
    fn test_reset_matches_fresh_engine() {
        let mut engine = ScoringEngine::new();
        for tick in 0..200 {
            engine.add_sample(
                frame(tick),
                PedalInput::new(30.0, 10.0),
                PedalInput::new(0.0, 60.0),
                TOLERANCE,
            );
        }
        engine.reset();

        let fresh = ScoringEngine::new();
        assert_eq!(engine.state(), EngineState::Idle);
        assert_eq!(engine.session_summary(TOLERANCE), fresh.session_summary(TOLERANCE));
        assert_eq!(engine.current_scores(), fresh.current_scores());
        assert!(engine.samples().is_empty());

        engine.reset();
        assert_eq!(engine.state(), EngineState::Idle);
    }

    #[test]
    fn test_replay_reproduces_summary() {
        let mut live = ScoringEngine::new();
        for tick in 0..240u32 {
            let t = frame(tick);
            let reference = PedalInput::new((t * 2.0).sin().abs() * 100.0, 0.0);
            let player = PedalInput::new((t * 2.0 - 0.1).sin().abs() * 100.0, 0.0);
            live.add_sample(t, player, reference, TOLERANCE);
        }

        let replayed = ScoringEngine::replay(live.samples(), TOLERANCE);
        assert_eq!(replayed.samples(), live.samples());
        assert_eq!(
            replayed.session_summary(TOLERANCE),
            live.session_summary(TOLERANCE)
        );
        assert_eq!(replayed.current_scores(), live.current_scores());
    }
}
