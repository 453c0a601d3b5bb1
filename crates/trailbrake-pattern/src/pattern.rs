//! Pattern and segment definitions.

use serde::{Deserialize, Serialize};

use crate::error::{PatternError, PatternResult};

/// Lowest pedal value a keyframe may carry.
pub const PEDAL_MIN: f64 = 0.0;

/// Highest pedal value a keyframe may carry.
pub const PEDAL_MAX: f64 = 100.0;

/// Segment time window in seconds, serialized as `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct TimeRange {
    /// Window start in seconds.
    pub start: f64,
    /// Window end in seconds.
    pub end: f64,
}

impl TimeRange {
    /// Create a new time range.
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Window length in seconds.
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// Inclusive containment on both ends.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time <= self.end
    }

    /// Strict containment, used when looking for genuine overlaps.
    pub fn contains_interior(&self, time: f64) -> bool {
        time > self.start && time < self.end
    }

    /// True when `time` is the window's first instant.
    pub fn starts_at(&self, time: f64) -> bool {
        self.contains(time) && time <= self.start
    }

    /// True when `time` is the window's last instant.
    pub fn ends_at(&self, time: f64) -> bool {
        self.contains(time) && time >= self.end
    }

    /// Linear progress of `time` through the window.
    pub fn progress(&self, time: f64) -> f64 {
        (time - self.start) / self.length()
    }
}

impl From<[f64; 2]> for TimeRange {
    fn from([start, end]: [f64; 2]) -> Self {
        Self { start, end }
    }
}

impl From<TimeRange> for [f64; 2] {
    fn from(range: TimeRange) -> Self {
        [range.start, range.end]
    }
}

/// Start/end keyframe pair for one pedal channel, serialized as `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Keyframes {
    /// Value at the start of the segment.
    pub start: f64,
    /// Value at the end of the segment.
    pub end: f64,
}

impl Keyframes {
    /// Create a new keyframe pair.
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Hold a constant value for the whole segment.
    pub const fn hold(value: f64) -> Self {
        Self {
            start: value,
            end: value,
        }
    }

    /// Largest value the eased ramp reaches.
    pub fn peak(&self) -> f64 {
        self.start.max(self.end)
    }

    /// Eased value at `progress` through the segment.
    pub fn at(&self, progress: f64) -> f64 {
        crate::easing::interpolate(self.start, self.end, progress)
    }
}

impl From<[f64; 2]> for Keyframes {
    fn from([start, end]: [f64; 2]) -> Self {
        Self { start, end }
    }
}

impl From<Keyframes> for [f64; 2] {
    fn from(keyframes: Keyframes) -> Self {
        [keyframes.start, keyframes.end]
    }
}

/// One keyframe interval of a pattern.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Time window the segment is active in.
    pub time_range: TimeRange,
    /// Throttle keyframes.
    pub throttle: Keyframes,
    /// Brake keyframes.
    pub brake: Keyframes,
    /// Informational label shown next to the trace.
    #[serde(default)]
    pub label: String,
}

impl Segment {
    /// Create a segment over `[start, end]` with both pedals at zero.
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            time_range: TimeRange::new(start, end),
            ..Self::default()
        }
    }

    /// Set the throttle ramp.
    #[must_use]
    pub fn throttle(mut self, start: f64, end: f64) -> Self {
        self.throttle = Keyframes::new(start, end);
        self
    }

    /// Set the brake ramp.
    #[must_use]
    pub fn brake(mut self, start: f64, end: f64) -> Self {
        self.brake = Keyframes::new(start, end);
        self
    }

    /// Set the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub(crate) fn validate(&self, index: usize, duration: f64) -> PatternResult<()> {
        let TimeRange { start, end } = self.time_range;

        if !start.is_finite() || !end.is_finite() {
            return Err(PatternError::invalid(format!(
                "segments[{index}].timeRange must contain finite numbers, got [{start}, {end}]"
            )));
        }
        if start >= end {
            return Err(PatternError::invalid(format!(
                "segments[{index}].timeRange start {start} must be before end {end}"
            )));
        }
        if start < 0.0 || end > duration {
            return Err(PatternError::invalid(format!(
                "segments[{index}].timeRange [{start}, {end}] lies outside [0, {duration}]"
            )));
        }

        check_keyframes(index, "throttle", self.throttle)?;
        check_keyframes(index, "brake", self.brake)
    }
}

pub(crate) fn check_name(name: &str) -> PatternResult<()> {
    if name.trim().is_empty() {
        return Err(PatternError::invalid("missing required field 'name'"));
    }
    Ok(())
}

pub(crate) fn check_duration(duration: f64) -> PatternResult<()> {
    if !duration.is_finite() || duration <= 0.0 {
        return Err(PatternError::invalid(format!(
            "duration must be a positive number of seconds, got {duration}"
        )));
    }
    Ok(())
}

fn check_keyframes(index: usize, channel: &str, keyframes: Keyframes) -> PatternResult<()> {
    for (which, value) in [("start", keyframes.start), ("end", keyframes.end)] {
        if !value.is_finite() || !(PEDAL_MIN..=PEDAL_MAX).contains(&value) {
            return Err(PatternError::invalid(format!(
                "segments[{index}].{channel} {which} value {value} is outside [{PEDAL_MIN}, {PEDAL_MAX}]"
            )));
        }
    }
    Ok(())
}

/// Declarative definition of a training exercise.
///
/// Segment order does not affect evaluation; segments are looked up by time
/// containment. Order is still preserved so exported JSON matches the import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    /// Display label.
    pub name: String,
    /// Total length in seconds.
    pub duration: f64,
    /// Free text shown to the driver before the exercise.
    #[serde(default)]
    pub description: String,
    /// Keyframe intervals, possibly overlapping.
    pub segments: Vec<Segment>,
}

impl Pattern {
    /// Create an empty pattern. It does not validate until a segment is added.
    pub fn new(name: impl Into<String>, duration: f64) -> Self {
        Self {
            name: name.into(),
            duration,
            description: String::new(),
            segments: Vec::new(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append a segment.
    #[must_use]
    pub fn with_segment(mut self, segment: Segment) -> Self {
        self.segments.push(segment);
        self
    }

    /// Check the pattern against the authoring contract.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::InvalidPattern`] naming the first failing field
    /// or segment index when:
    /// - the name is empty or the duration is not a positive finite number
    /// - there are no segments
    /// - a segment's time range is not finite, not ordered, or outside
    ///   `[0, duration]`
    /// - a throttle or brake keyframe lies outside `[0, 100]`
    pub fn validate(&self) -> PatternResult<()> {
        check_name(&self.name)?;
        check_duration(self.duration)?;
        if self.segments.is_empty() {
            return Err(PatternError::invalid(
                "'segments' must contain at least one segment",
            ));
        }

        for (index, segment) in self.segments.iter().enumerate() {
            segment.validate(index, self.duration)?;
        }

        Ok(())
    }
}
