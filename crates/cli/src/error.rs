//! Error types for the trailbrake CLI

use thiserror::Error;
use trailbrake_pattern::PatternError;
use trailbrake_scoring::RecordError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Pattern not found: {0}")]
    PatternNotFound(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error("Session record error: {0}")]
    Record(#[from] RecordError),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::PatternNotFound(_) | CliError::FileNotFound(_) => 3,
            CliError::ValidationError(_)
            | CliError::InvalidConfiguration(_)
            | CliError::JsonError(_)
            | CliError::YamlError(_)
            | CliError::Pattern(_)
            | CliError::Record(_) => 4,
            CliError::IoError(_) => 1,
        }
    }
}

/// Exit code for an error bubbled up to `main`.
///
/// Core errors that reached `anyhow` without passing through [`CliError`] are
/// still validation failures.
pub fn exit_code(error: &anyhow::Error) -> u8 {
    if let Some(err) = error.downcast_ref::<CliError>() {
        err.exit_code()
    } else if error.is::<PatternError>() || error.is::<RecordError>() {
        4
    } else {
        1
    }
}
