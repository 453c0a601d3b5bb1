//! Trainer configuration file

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use trailbrake_pattern::DEFAULT_PATTERN_ID;

use crate::error::CliError;

/// Settings shared by every command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainerConfig {
    /// Grading tolerance in pedal percent.
    pub tolerance: f64,
    /// Library pattern used when a command is not given one.
    pub default_pattern: String,
    /// Synthetic driver defaults for `session simulate`.
    pub simulation: SimulationConfig,
}

/// Synthetic driver settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// How far behind the reference the driver reacts, in seconds.
    pub lag_seconds: f64,
    /// Multiplier applied to the reference pedal values.
    pub gain: f64,
    /// Amplitude of the deterministic wobble added to each pedal.
    pub jitter: f64,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            tolerance: 15.0,
            default_pattern: DEFAULT_PATTERN_ID.to_string(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            lag_seconds: 0.15,
            gain: 1.0,
            jitter: 2.0,
        }
    }
}

impl TrainerConfig {
    /// Load `explicit` (from `--config` or `$TRAILBRAKE_CONFIG`), else the
    /// per-user config file, else defaults.
    ///
    /// An explicitly named file must exist; the per-user file is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, CliError> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(CliError::FileNotFound(path.display().to_string()));
            }
            return Self::from_file(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Read and validate a YAML config file.
    pub fn from_file(path: &Path) -> Result<Self, CliError> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Parse and validate YAML config text.
    pub fn from_yaml(content: &str) -> Result<Self, CliError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<(), CliError> {
        validate_tolerance(self.tolerance)?;

        let sim = &self.simulation;
        if !sim.lag_seconds.is_finite() || sim.lag_seconds < 0.0 {
            return Err(CliError::InvalidConfiguration(format!(
                "simulation.lag_seconds must be a non-negative number, got {}",
                sim.lag_seconds
            )));
        }
        if !sim.gain.is_finite() || sim.gain < 0.0 {
            return Err(CliError::InvalidConfiguration(format!(
                "simulation.gain must be a non-negative number, got {}",
                sim.gain
            )));
        }
        if !sim.jitter.is_finite() || sim.jitter < 0.0 {
            return Err(CliError::InvalidConfiguration(format!(
                "simulation.jitter must be a non-negative number, got {}",
                sim.jitter
            )));
        }
        if self.default_pattern.trim().is_empty() {
            return Err(CliError::InvalidConfiguration(
                "default_pattern must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Reject tolerances that cannot produce a grade.
pub fn validate_tolerance(tolerance: f64) -> Result<f64, CliError> {
    if tolerance.is_finite() && tolerance > 0.0 {
        Ok(tolerance)
    } else {
        Err(CliError::InvalidConfiguration(format!(
            "tolerance must be a positive number, got {tolerance}"
        )))
    }
}

/// `<config_dir>/trailbrake/config.yaml` for the current user.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("trailbrake").join("config.yaml"))
}
