//! Built-in pattern library keyed by string identifier.
//!
//! The built-ins are constructed in code rather than parsed, and every one of
//! them must validate and lint clean. Where a ramp hands a non-zero value to
//! the next ramp on the same pedal, it ends 10 ms early so the 60 Hz tick on
//! the boundary belongs to one segment only. Custom patterns can be added with
//! [`PatternLibrary::insert`], which validates before accepting.

use tracing::warn;

use crate::error::PatternResult;
use crate::pattern::{Pattern, Segment};

/// Identifier used when nothing (or something unknown) is requested.
pub const DEFAULT_PATTERN_ID: &str = "threshold-braking";

/// Identifiers of the built-in patterns, in listing order.
pub const BUILTIN_PATTERN_IDS: [&str; 5] = [
    "threshold-braking",
    "trail-braking",
    "classic-lap",
    "hairpin",
    "throttle-control",
];

/// A set of patterns addressable by identifier.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    entries: Vec<(String, Pattern)>,
}

impl PatternLibrary {
    /// An empty library.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The built-in patterns.
    pub fn builtin() -> Self {
        let entries = vec![
            (BUILTIN_PATTERN_IDS[0].to_string(), threshold_braking()),
            (BUILTIN_PATTERN_IDS[1].to_string(), trail_braking()),
            (BUILTIN_PATTERN_IDS[2].to_string(), classic_lap()),
            (BUILTIN_PATTERN_IDS[3].to_string(), hairpin()),
            (BUILTIN_PATTERN_IDS[4].to_string(), throttle_control()),
        ];
        Self { entries }
    }

    /// Add or replace a pattern under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::InvalidPattern`](crate::PatternError::InvalidPattern)
    /// if the pattern does not validate; the library is left unchanged.
    pub fn insert(&mut self, id: impl Into<String>, pattern: Pattern) -> PatternResult<()> {
        pattern.validate()?;
        let id = id.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some((_, slot)) => *slot = pattern,
            None => self.entries.push((id, pattern)),
        }
        Ok(())
    }

    /// Pattern stored under `id`.
    pub fn get(&self, id: &str) -> Option<&Pattern> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, pattern)| pattern)
    }

    /// True if `id` is present.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Pattern for `id`, falling back to [`DEFAULT_PATTERN_ID`] when `id` is
    /// unknown.
    ///
    /// Returns the identifier actually used alongside the pattern. `None` only
    /// when neither `id` nor the default is present.
    pub fn resolve(&self, id: &str) -> Option<(&str, &Pattern)> {
        if let Some(found) = self.lookup(id) {
            return Some(found);
        }

        warn!(
            requested = id,
            fallback = DEFAULT_PATTERN_ID,
            "Unknown pattern identifier, using default"
        );
        self.lookup(DEFAULT_PATTERN_ID)
    }

    /// Identifiers in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    /// `(id, pattern)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Pattern)> {
        self.entries
            .iter()
            .map(|(id, pattern)| (id.as_str(), pattern))
    }

    /// Number of patterns.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the library holds no patterns.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup(&self, id: &str) -> Option<(&str, &Pattern)> {
        self.iter().find(|(existing, _)| *existing == id)
    }
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

fn threshold_braking() -> Pattern {
    Pattern::new("Threshold Braking", 8.0)
        .with_description(
            "Straight-line stop: hit peak brake pressure quickly, hold it, then bleed off \
             smoothly before getting back to full throttle.",
        )
        .with_segment(Segment::new(0.0, 1.99).throttle(100.0, 100.0).label("Full throttle"))
        .with_segment(Segment::new(2.0, 2.4).throttle(100.0, 0.0).label("Lift"))
        .with_segment(Segment::new(2.4, 2.99).brake(0.0, 100.0).label("Hit the brake"))
        .with_segment(Segment::new(3.0, 4.49).brake(100.0, 60.0).label("Bleed off"))
        .with_segment(Segment::new(4.5, 5.5).brake(60.0, 0.0).label("Release"))
        .with_segment(Segment::new(5.5, 6.0).label("Coast"))
        .with_segment(Segment::new(6.0, 8.0).throttle(0.0, 100.0).label("Power out"))
}

fn trail_braking() -> Pattern {
    Pattern::new("Trail Braking", 8.0)
        .with_description(
            "Carry brake pressure into the corner while rolling off, and pick the throttle \
             up before the brake is fully released.",
        )
        .with_segment(Segment::new(0.0, 1.99).throttle(100.0, 100.0).label("Straight"))
        .with_segment(Segment::new(2.0, 2.6).throttle(100.0, 0.0).label("Lift"))
        .with_segment(Segment::new(2.2, 2.99).brake(0.0, 90.0).label("Brake"))
        .with_segment(Segment::new(3.0, 5.0).brake(90.0, 0.0).label("Trail off"))
        .with_segment(Segment::new(4.2, 4.99).throttle(0.0, 30.0).label("Pick up throttle"))
        .with_segment(Segment::new(5.0, 6.99).throttle(30.0, 100.0).label("Exit"))
        .with_segment(Segment::new(7.0, 8.0).throttle(100.0, 100.0).label("Straight"))
}

/// The fixed lap the trainer shipped with before patterns were configurable.
fn classic_lap() -> Pattern {
    Pattern::new("Classic Lap", 10.0)
        .with_description("A short lap: one heavy braking zone, a fast chicane and two straights.")
        .with_segment(Segment::new(0.0, 1.99).throttle(100.0, 100.0).label("Main straight"))
        .with_segment(Segment::new(2.0, 2.3).throttle(100.0, 0.0).label("Lift"))
        .with_segment(Segment::new(2.3, 2.79).brake(0.0, 95.0).label("Turn 1 brake"))
        .with_segment(Segment::new(2.8, 3.99).brake(95.0, 20.0).label("Trail in"))
        .with_segment(Segment::new(4.0, 4.5).brake(20.0, 0.0).label("Release"))
        .with_segment(Segment::new(4.2, 5.49).throttle(0.0, 100.0).label("Exit"))
        .with_segment(Segment::new(5.5, 6.99).throttle(100.0, 100.0).label("Back straight"))
        .with_segment(Segment::new(7.0, 7.29).throttle(100.0, 40.0).label("Lift for chicane"))
        .with_segment(Segment::new(7.3, 8.49).throttle(40.0, 40.0).label("Maintenance throttle"))
        .with_segment(Segment::new(7.3, 7.79).brake(0.0, 50.0).label("Chicane brake"))
        .with_segment(Segment::new(7.8, 8.5).brake(50.0, 0.0).label("Release"))
        .with_segment(Segment::new(8.5, 10.0).throttle(40.0, 100.0).label("Final straight"))
}

fn hairpin() -> Pattern {
    Pattern::new("Hairpin", 9.0)
        .with_description(
            "Heavy stop into a slow corner: long trail phase to rotate the car, then a \
             patient throttle pick-up.",
        )
        .with_segment(Segment::new(0.0, 2.49).throttle(100.0, 100.0).label("Approach"))
        .with_segment(Segment::new(2.5, 2.8).throttle(100.0, 0.0).label("Lift"))
        .with_segment(Segment::new(2.8, 3.49).brake(0.0, 100.0).label("Threshold"))
        .with_segment(Segment::new(3.5, 4.99).brake(100.0, 40.0).label("Trail"))
        .with_segment(Segment::new(5.0, 6.0).brake(40.0, 0.0).label("Rotate"))
        .with_segment(Segment::new(5.8, 6.49).throttle(0.0, 20.0).label("Balance"))
        .with_segment(Segment::new(6.5, 9.0).throttle(20.0, 100.0).label("Exit"))
}

fn throttle_control() -> Pattern {
    Pattern::new("Throttle Control", 8.0)
        .with_description("Partial-throttle modulation without touching the brake.")
        .with_segment(Segment::new(0.0, 1.49).throttle(0.0, 60.0).label("Squeeze"))
        .with_segment(Segment::new(1.5, 2.99).throttle(60.0, 40.0).label("Settle"))
        .with_segment(Segment::new(3.0, 4.49).throttle(40.0, 80.0).label("Build"))
        .with_segment(Segment::new(4.5, 5.49).throttle(80.0, 50.0).label("Catch"))
        .with_segment(Segment::new(5.5, 8.0).throttle(50.0, 100.0).label("Full power"))
}
