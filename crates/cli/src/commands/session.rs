//! Session simulation and replay commands

use anyhow::Result;
use chrono::Local;
use serde_json::json;
use std::fs;
use std::path::Path;
use tracing::{info, warn};
use trailbrake_pattern::{ActivePattern, PatternLibrary};
use trailbrake_scoring::SessionRecord;

use crate::commands::{SessionCommands, load_pattern, read_file};
use crate::config::{SimulationConfig, TrainerConfig, validate_tolerance};
use crate::driver::SyntheticDriver;
use crate::error::CliError;
use crate::output;

/// Execute session command
pub fn execute(cmd: &SessionCommands, json: bool, config: &TrainerConfig) -> Result<()> {
    match cmd {
        SessionCommands::Simulate {
            pattern,
            lag,
            gain,
            jitter,
            tolerance,
            record,
        } => {
            let simulation = SimulationConfig {
                lag_seconds: lag.unwrap_or(config.simulation.lag_seconds),
                gain: gain.unwrap_or(config.simulation.gain),
                jitter: jitter.unwrap_or(config.simulation.jitter),
            };
            let overrides = TrainerConfig {
                tolerance: tolerance.unwrap_or(config.tolerance),
                default_pattern: config.default_pattern.clone(),
                simulation,
            };
            overrides.validate()?;
            simulate(pattern.as_deref(), &overrides, record.as_deref(), json)
        }
        SessionCommands::Replay { path, tolerance } => replay(path, *tolerance, json),
    }
}

fn simulate(
    source: Option<&str>,
    config: &TrainerConfig,
    record_path: Option<&Path>,
    json: bool,
) -> Result<()> {
    let library = PatternLibrary::builtin();
    let (id, pattern) = match source {
        Some(source) => load_pattern(&library, source)?,
        None => library
            .resolve(&config.default_pattern)
            .map(|(id, pattern)| (id.to_string(), pattern.clone()))
            .ok_or_else(|| CliError::PatternNotFound(config.default_pattern.clone()))?,
    };

    let active = ActivePattern::new(pattern).map_err(CliError::from)?;
    let driver = SyntheticDriver::from(config.simulation);
    info!(
        pattern = %id,
        lag = driver.lag,
        gain = driver.gain,
        jitter = driver.jitter,
        tolerance = config.tolerance,
        "Simulating session"
    );

    let engine = driver.run(&active, config.tolerance);
    let summary = engine.session_summary(config.tolerance);
    let live = engine.current_scores();

    if let Some(path) = record_path {
        let record = SessionRecord::new(active.pattern().name.clone(), config.tolerance, &engine);
        let content = record.to_json_pretty().map_err(CliError::from)?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        info!(path = %path.display(), id = %record.id, "Session record written");
    }

    if json {
        output::print_envelope(json!({
            "pattern": id,
            "tolerance": config.tolerance,
            "summary": summary,
            "live": live,
            "record": record_path.map(|path| path.display().to_string()),
        }));
    } else {
        output::print_summary(&active.pattern().name, &summary);
        if let Some(path) = record_path {
            output::print_success(&format!("Session recorded to {}", path.display()), false);
        }
    }

    Ok(())
}

fn replay(path: &Path, tolerance: Option<f64>, json: bool) -> Result<()> {
    let content = read_file(path)?;
    let record = SessionRecord::from_json(&content).map_err(CliError::from)?;

    let tolerance = match tolerance {
        Some(tolerance) => validate_tolerance(tolerance)?,
        None => record.tolerance,
    };
    let recomputed = record.rescore_with(tolerance);
    let consistent = record.is_consistent();
    if !consistent {
        warn!(
            path = %path.display(),
            id = %record.id,
            "Stored summary does not match a replay of its samples"
        );
    }

    if json {
        output::print_envelope(json!({
            "id": record.id,
            "pattern": record.pattern_name,
            "recordedAt": record.recorded_at,
            "tolerance": tolerance,
            "stored": record.summary,
            "recomputed": recomputed,
            "consistent": consistent,
        }));
    } else {
        println!(
            "Recorded {} ({})",
            record
                .recorded_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S"),
            record.id
        );
        output::print_summary(&record.pattern_name, &recomputed);
        if consistent {
            output::print_success("Stored summary matches replay", false);
        } else {
            output::print_warning(
                &format!(
                    "Stored summary differs from replay (stored grade {}, mean deviation {:.2})",
                    record.summary.grade, record.summary.mean_deviation
                ),
                false,
            );
        }
    }

    Ok(())
}
