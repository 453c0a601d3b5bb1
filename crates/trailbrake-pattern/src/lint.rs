//! Authoring diagnostics for overlapping segments.
//!
//! Overlapping contributions are summed and the result is clamped during
//! generation, so a pattern whose overlaps add past 100 % still renders, just
//! flattened. Containment is inclusive on both ends, so a segment that ends on
//! the tick where the next one starts is counted twice on that tick. These
//! warnings point at both cases. They never reject a pattern.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::input::PedalInput;
use crate::pattern::{PEDAL_MAX, Pattern, Segment};
use crate::signal::{summed_levels, tick_count, tick_time};

/// Pedal channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Throttle pedal.
    Throttle,
    /// Brake pedal.
    Brake,
}

impl Channel {
    const ALL: [Channel; 2] = [Channel::Throttle, Channel::Brake];

    fn of(self, input: PedalInput) -> f64 {
        match self {
            Channel::Throttle => input.throttle,
            Channel::Brake => input.brake,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Throttle => f.write_str("throttle"),
            Channel::Brake => f.write_str("brake"),
        }
    }
}

/// What an [`AuthoringWarning`] is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WarningKind {
    /// Overlapping segments sum past the pedal range and get clamped.
    Overflow,
    /// A segment ends on the tick where another starts, both with a non-zero
    /// value, so that single tick carries the sum of the two.
    DoubledHandoff,
}

/// A window where the summed level does not match what the author drew.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthoringWarning {
    /// Kind of problem.
    pub kind: WarningKind,
    /// Affected channel.
    pub channel: Channel,
    /// First tick time in the window.
    pub start: f64,
    /// Last tick time in the window.
    pub end: f64,
    /// Largest summed value before clamping.
    pub peak: f64,
}

impl fmt::Display for AuthoringWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            WarningKind::Overflow => write!(
                f,
                "{} overlap sums to {:.1} between {:.3}s and {:.3}s and will be clamped to {}",
                self.channel, self.peak, self.start, self.end, PEDAL_MAX
            ),
            WarningKind::DoubledHandoff => write!(
                f,
                "{} handoff at {:.3}s counts both segments for one tick ({:.1})",
                self.channel, self.start, self.peak
            ),
        }
    }
}

impl Pattern {
    /// Find ticks where the summed level misrepresents the authored segments.
    ///
    /// Two cases are reported:
    /// - [`WarningKind::Overflow`]: ticks strictly inside two or more segments
    ///   that sum above 100 %, merged into windows
    /// - [`WarningKind::DoubledHandoff`]: a tick where one segment ends and
    ///   another starts, both non-zero on the same channel
    ///
    /// A handoff where either side is at zero is clean.
    pub fn authoring_warnings(&self) -> Vec<AuthoringWarning> {
        let mut warnings = Vec::new();
        let mut open: [Option<AuthoringWarning>; 2] = [None, None];

        for tick in 0..tick_count(self.duration) {
            let time = tick_time(tick);
            let overlapping: Vec<_> = self
                .segments
                .iter()
                .filter(|segment| segment.time_range.contains_interior(time))
                .collect();

            let level = if overlapping.len() > 1 {
                Some(summed_levels(overlapping, time))
            } else {
                None
            };

            for (slot, channel) in open.iter_mut().zip(Channel::ALL) {
                let value = level.map(|level| channel.of(level));

                match (value, slot.as_mut()) {
                    (Some(value), Some(window)) if value > PEDAL_MAX => {
                        window.end = time;
                        window.peak = window.peak.max(value);
                    }
                    (Some(value), None) if value > PEDAL_MAX => {
                        *slot = Some(AuthoringWarning {
                            kind: WarningKind::Overflow,
                            channel,
                            start: time,
                            end: time,
                            peak: value,
                        });
                    }
                    _ => warnings.extend(slot.take()),
                }
            }

            warnings.extend(self.doubled_handoffs(time));
        }

        warnings.extend(open.into_iter().flatten());
        warnings.sort_by(|a, b| a.start.total_cmp(&b.start));
        warnings
    }

    fn doubled_handoffs(&self, time: f64) -> Vec<AuthoringWarning> {
        let ending: Vec<&Segment> = self
            .segments
            .iter()
            .filter(|segment| segment.time_range.ends_at(time))
            .collect();
        let starting: Vec<&Segment> = self
            .segments
            .iter()
            .filter(|segment| segment.time_range.starts_at(time))
            .collect();
        if ending.is_empty() || starting.is_empty() {
            return Vec::new();
        }

        let outgoing = summed_levels(ending, time);
        let incoming = summed_levels(starting, time);
        let total = summed_levels(&self.segments, time);

        Channel::ALL
            .into_iter()
            .filter(|channel| channel.of(outgoing) > 0.0 && channel.of(incoming) > 0.0)
            .map(|channel| AuthoringWarning {
                kind: WarningKind::DoubledHandoff,
                channel,
                start: time,
                end: time,
                peak: channel.of(total),
            })
            .collect()
    }
}
