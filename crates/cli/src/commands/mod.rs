//! Command implementations for the trailbrake CLI

pub mod pattern;
pub mod session;

use clap::Subcommand;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use trailbrake_pattern::{Pattern, PatternLibrary, parse_pattern};

use crate::error::CliError;

#[derive(Subcommand)]
pub enum PatternCommands {
    /// List built-in patterns
    List,

    /// Show pattern details
    Show {
        /// Built-in pattern ID or pattern file
        pattern: String,
    },

    /// Export pattern as JSON
    Export {
        /// Built-in pattern ID or pattern file
        pattern: String,
        /// Output file path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a pattern file and report authoring warnings
    Validate {
        /// Pattern file path
        path: PathBuf,
    },

    /// Print reference values of a pattern
    Sample {
        /// Built-in pattern ID or pattern file
        pattern: String,
        /// Times to query, in seconds
        #[arg(long, num_args = 1.., allow_negative_numbers = true)]
        at: Vec<f64>,
        /// Step between queries when --at is not given, in seconds
        #[arg(long, default_value_t = 0.5)]
        step: f64,
    },
}

#[derive(Subcommand)]
pub enum SessionCommands {
    /// Run a synthetic driver through a pattern and grade it
    Simulate {
        /// Built-in pattern ID or pattern file (config default if omitted)
        pattern: Option<String>,
        /// Reaction lag in seconds
        #[arg(long)]
        lag: Option<f64>,
        /// Pedal gain applied to the reference
        #[arg(long)]
        gain: Option<f64>,
        /// Wobble amplitude in pedal percent
        #[arg(long)]
        jitter: Option<f64>,
        /// Grading tolerance in pedal percent
        #[arg(short, long)]
        tolerance: Option<f64>,
        /// Write the session record to this file
        #[arg(long)]
        record: Option<PathBuf>,
    },

    /// Re-score a recorded session
    Replay {
        /// Session record file
        path: PathBuf,
        /// Grade with this tolerance instead of the recorded one
        #[arg(short, long)]
        tolerance: Option<f64>,
    },
}

/// Resolve a pattern argument: a library ID first, then a file path.
///
/// Patterns read from files are validated, and authoring warnings are logged.
pub fn load_pattern(library: &PatternLibrary, source: &str) -> Result<(String, Pattern), CliError> {
    if let Some(pattern) = library.get(source) {
        return Ok((source.to_string(), pattern.clone()));
    }

    let path = Path::new(source);
    if !path.is_file() {
        return Err(CliError::PatternNotFound(source.to_string()));
    }

    let pattern = read_pattern_file(path)?;
    for warning in pattern.authoring_warnings() {
        warn!(
            path = %path.display(),
            kind = ?warning.kind,
            channel = %warning.channel,
            start = warning.start,
            end = warning.end,
            peak = warning.peak,
            "Pattern authoring warning"
        );
    }

    let id = path
        .file_stem()
        .map_or_else(|| source.to_string(), |stem| stem.to_string_lossy().into_owned());
    info!(id = %id, name = %pattern.name, "Loaded custom pattern");
    Ok((id, pattern))
}

/// Read and validate a pattern file.
pub fn read_pattern_file(path: &Path) -> Result<Pattern, CliError> {
    let content = read_file(path)?;
    Ok(parse_pattern(&content)?)
}

/// Read a text file, reporting a missing file as not found.
pub fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => CliError::FileNotFound(path.display().to_string()),
        _ => CliError::IoError(err),
    })
}
