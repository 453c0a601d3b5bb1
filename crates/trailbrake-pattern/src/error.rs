//! Error types for pattern loading and validation.

use thiserror::Error;

/// Error raised before a pattern is allowed to drive a reference signal.
///
/// Syntax problems and schema problems are kept apart so callers can tell
/// "this is not JSON" from "this JSON is not a usable pattern".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// The pattern is structurally or numerically unusable.
    ///
    /// The reason names the first offending field or segment index,
    /// e.g. `segments[2].timeRange`.
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    /// The supplied text is not well-formed JSON.
    #[error("Malformed pattern JSON: {0}")]
    MalformedJson(String),
}

impl PatternError {
    /// Create an [`PatternError::InvalidPattern`] with the given reason.
    pub fn invalid(reason: impl Into<String>) -> Self {
        PatternError::InvalidPattern(reason.into())
    }

    /// Create a [`PatternError::MalformedJson`] with the given reason.
    pub fn malformed(reason: impl Into<String>) -> Self {
        PatternError::MalformedJson(reason.into())
    }

    /// The human-readable reason without the error kind prefix.
    pub fn reason(&self) -> &str {
        match self {
            PatternError::InvalidPattern(reason) | PatternError::MalformedJson(reason) => reason,
        }
    }

    /// True for syntax errors, false for schema errors.
    pub fn is_syntax_error(&self) -> bool {
        matches!(self, PatternError::MalformedJson(_))
    }
}

/// Result alias for pattern operations.
pub type PatternResult<T> = Result<T, PatternError>;
