//! Reference signal generation and lookup.
//!
//! A [`ReferenceSignal`] is a pattern materialized at [`SAMPLE_RATE_HZ`]. It is
//! generated once per pattern change and then queried every rendered frame.
//!
//! # Generation
//!
//! For every tick `t = i / 60`:
//! 1. each segment whose time range contains `t` contributes its eased keyframe
//!    value, and contributions are summed per channel
//! 2. a small deterministic ripple is added (throttle always, brake only once
//!    the brake is already above 10 %)
//! 3. both channels are clamped to `[0, 100]`
//!
//! # Lookup
//!
//! [`ReferenceSignal::query_at`] linearly interpolates between the two
//! bracketing ticks, so playback at any frame rate reads a continuous trace.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::input::PedalInput;
use crate::pattern::{Pattern, Segment};

/// Reference signal sample rate.
pub const SAMPLE_RATE_HZ: f64 = 60.0;

/// Brake level above which the brake ripple is applied.
const BRAKE_RIPPLE_THRESHOLD: f64 = 10.0;

/// One tick of a reference signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceSample {
    /// Tick time in seconds.
    pub time: f64,
    /// Throttle in `[0, 100]`.
    pub throttle: f64,
    /// Brake in `[0, 100]`.
    pub brake: f64,
}

impl ReferenceSample {
    /// Pedal values of this tick.
    pub fn input(&self) -> PedalInput {
        PedalInput::new(self.throttle, self.brake)
    }
}

/// A pattern materialized at 60 Hz.
///
/// Immutable once generated. Generation is deterministic: the same pattern
/// always yields a bit-identical signal.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceSignal {
    samples: Vec<ReferenceSample>,
    duration: f64,
}

impl ReferenceSignal {
    /// Generate the reference signal for a pattern.
    ///
    /// The pattern is expected to have passed [`Pattern::validate`]; an
    /// unvalidated pattern still produces a clamped signal, just not a
    /// meaningful one.
    pub fn generate(pattern: &Pattern) -> Self {
        let count = tick_count(pattern.duration);
        let samples: Vec<ReferenceSample> = (0..count)
            .map(|tick| reference_sample(&pattern.segments, tick_time(tick)))
            .collect();

        debug!(
            pattern = %pattern.name,
            duration = pattern.duration,
            samples = samples.len(),
            "Generated reference signal"
        );

        Self {
            samples,
            duration: pattern.duration,
        }
    }

    /// Reference pedal values at an arbitrary time.
    ///
    /// - negative (or NaN) times read as both pedals released
    /// - times at or past the last tick hold the last tick's values
    /// - anything in between is linearly interpolated from the two
    ///   bracketing ticks
    pub fn query_at(&self, time: f64) -> PedalInput {
        if time.is_nan() || time < 0.0 {
            return PedalInput::ZERO;
        }
        let Some(last) = self.samples.last() else {
            return PedalInput::ZERO;
        };

        let position = time * SAMPLE_RATE_HZ;
        let floor = position.floor();
        let last_index = self.samples.len().saturating_sub(1);
        if floor >= last_index as f64 {
            return last.input();
        }

        let index = floor as usize;
        let fraction = position - floor;
        match (self.samples.get(index), self.samples.get(index + 1)) {
            (Some(low), Some(high)) => low.input().lerp(high.input(), fraction),
            _ => last.input(),
        }
    }

    /// All ticks in time order.
    pub fn samples(&self) -> &[ReferenceSample] {
        &self.samples
    }

    /// Number of ticks.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the pattern was shorter than one tick.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration of the source pattern in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Highest throttle and highest brake anywhere in the signal.
    pub fn peak(&self) -> PedalInput {
        self.samples
            .iter()
            .fold(PedalInput::ZERO, |peak, sample| PedalInput {
                throttle: peak.throttle.max(sample.throttle),
                brake: peak.brake.max(sample.brake),
            })
    }
}

/// Summed eased contribution of every segment containing `time`.
///
/// No ripple and no clamping; this is the raw authored level.
pub(crate) fn summed_levels<'a, I>(segments: I, time: f64) -> PedalInput
where
    I: IntoIterator<Item = &'a Segment>,
{
    segments
        .into_iter()
        .filter(|segment| segment.time_range.contains(time))
        .fold(PedalInput::ZERO, |total, segment| {
            let progress = segment.time_range.progress(time);
            PedalInput {
                throttle: total.throttle + segment.throttle.at(progress),
                brake: total.brake + segment.brake.at(progress),
            }
        })
}

fn reference_sample(segments: &[Segment], time: f64) -> ReferenceSample {
    let mut level = summed_levels(segments, time);

    level.throttle += (time * 5.0).sin() * 2.0;
    if level.brake > BRAKE_RIPPLE_THRESHOLD {
        level.brake += (time * 8.0).sin() * 3.0;
    }

    let level = level.clamped();
    ReferenceSample {
        time,
        throttle: level.throttle,
        brake: level.brake,
    }
}

pub(crate) fn tick_count(duration: f64) -> usize {
    let ticks = (duration * SAMPLE_RATE_HZ).floor();
    if ticks.is_finite() && ticks > 0.0 {
        ticks as usize
    } else {
        0
    }
}

pub(crate) fn tick_time(tick: usize) -> f64 {
    tick as f64 / SAMPLE_RATE_HZ
}
