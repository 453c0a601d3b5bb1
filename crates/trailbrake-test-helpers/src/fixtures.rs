//! Pattern fixtures and scripted drivers.

use serde_json::{Value, json};
use trailbrake_pattern::{PedalInput, Pattern, ReferenceSignal, SAMPLE_RATE_HZ, Segment};
use trailbrake_scoring::ScoringEngine;

/// Two throttle ramps `[0, 2]` and `[1, 3]`, both `0 -> 50`, over 3 s.
///
/// Between 1 s and 2 s both segments contribute and the signal carries their
/// sum.
pub fn overlap_pattern() -> Pattern {
    Pattern::new("Overlap", 3.0)
        .with_segment(Segment::new(0.0, 2.0).throttle(0.0, 50.0))
        .with_segment(Segment::new(1.0, 3.0).throttle(0.0, 50.0))
}

/// Lift then brake and release, no overlap, 4 s.
pub fn brake_zone_pattern() -> Pattern {
    Pattern::new("Brake zone", 4.0)
        .with_description("Lift, brake hard, release")
        .with_segment(Segment::new(0.0, 1.0).throttle(100.0, 0.0).label("Lift"))
        .with_segment(Segment::new(1.0, 2.0).brake(0.0, 100.0).label("Squeeze"))
        .with_segment(Segment::new(2.0, 4.0).brake(100.0, 0.0).label("Release"))
}

/// Two full-brake holds stacked on top of each other; sums to 200 % before
/// clamping.
pub fn stacked_brake_pattern() -> Pattern {
    Pattern::new("Stacked", 2.0)
        .with_segment(Segment::new(0.0, 2.0).brake(100.0, 100.0))
        .with_segment(Segment::new(0.5, 1.5).brake(100.0, 100.0))
}

/// [`brake_zone_pattern`] as a JSON value, for mutating into broken imports.
pub fn brake_zone_json() -> Value {
    json!({
        "name": "Brake zone",
        "duration": 4.0,
        "description": "Lift, brake hard, release",
        "segments": [
            { "timeRange": [0.0, 1.0], "throttle": [100.0, 0.0], "brake": [0.0, 0.0], "label": "Lift" },
            { "timeRange": [1.0, 2.0], "throttle": [0.0, 0.0], "brake": [0.0, 100.0], "label": "Squeeze" },
            { "timeRange": [2.0, 4.0], "throttle": [0.0, 0.0], "brake": [100.0, 0.0], "label": "Release" }
        ]
    })
}

/// Time of 60 Hz frame `tick`.
pub fn frame_time(tick: usize) -> f64 {
    tick as f64 / SAMPLE_RATE_HZ
}

/// Play `signal` frame by frame into a fresh engine.
///
/// `player` maps `(time, reference)` to what the scripted driver presses.
pub fn drive<F>(signal: &ReferenceSignal, tolerance: f64, mut player: F) -> ScoringEngine
where
    F: FnMut(f64, PedalInput) -> PedalInput,
{
    let mut engine = ScoringEngine::new();
    for tick in 0..signal.len() {
        let time = frame_time(tick);
        let reference = signal.query_at(time);
        engine.add_sample(time, player(time, reference), reference, tolerance);
    }
    engine
}

/// A driver that matches the reference exactly.
pub fn perfect_driver(_time: f64, reference: PedalInput) -> PedalInput {
    reference
}

/// A driver that reads the reference `lag` seconds late.
pub fn lagging_driver(signal: &ReferenceSignal, lag: f64) -> impl FnMut(f64, PedalInput) -> PedalInput + '_ {
    move |time, _| signal.query_at(time - lag)
}
