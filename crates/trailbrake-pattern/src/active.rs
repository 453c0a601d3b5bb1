//! The pattern currently driving a session, together with its signal.

use tracing::info;

use crate::error::PatternResult;
use crate::input::PedalInput;
use crate::json::parse_pattern;
use crate::pattern::Pattern;
use crate::signal::ReferenceSignal;

/// A validated pattern and the reference signal generated from it.
///
/// The pair only changes as a unit. A replacement that fails validation leaves
/// the current pattern and signal untouched.
#[derive(Debug, Clone)]
pub struct ActivePattern {
    pattern: Pattern,
    signal: ReferenceSignal,
}

impl ActivePattern {
    /// Validate `pattern` and generate its signal.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::InvalidPattern`](crate::PatternError::InvalidPattern)
    /// if the pattern does not validate.
    pub fn new(pattern: Pattern) -> PatternResult<Self> {
        pattern.validate()?;
        let signal = ReferenceSignal::generate(&pattern);
        Ok(Self { pattern, signal })
    }

    /// Swap in a new pattern, regenerating the signal.
    ///
    /// # Errors
    ///
    /// Returns the validation error and keeps the previous pattern active.
    pub fn replace(&mut self, pattern: Pattern) -> PatternResult<()> {
        let next = Self::new(pattern)?;
        info!(
            from = %self.pattern.name,
            to = %next.pattern.name,
            "Active pattern replaced"
        );
        *self = next;
        Ok(())
    }

    /// Parse, validate and swap in a pattern from JSON text.
    ///
    /// # Errors
    ///
    /// [`PatternError::MalformedJson`](crate::PatternError::MalformedJson) or
    /// [`PatternError::InvalidPattern`](crate::PatternError::InvalidPattern);
    /// either way the previous pattern stays active.
    pub fn replace_from_json(&mut self, text: &str) -> PatternResult<()> {
        self.replace(parse_pattern(text)?)
    }

    /// The active pattern.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// The signal generated from the active pattern.
    pub fn signal(&self) -> &ReferenceSignal {
        &self.signal
    }

    /// Shorthand for [`ReferenceSignal::query_at`] on the active signal.
    pub fn query_at(&self, time: f64) -> PedalInput {
        self.signal.query_at(time)
    }
}
