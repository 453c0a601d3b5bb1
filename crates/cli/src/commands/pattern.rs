//! Pattern library commands

use anyhow::Result;
use std::fs;
use std::path::Path;
use trailbrake_pattern::{
    ActivePattern, PatternLibrary, ReferenceSample, SAMPLE_RATE_HZ, to_json_pretty,
};

use crate::commands::{PatternCommands, load_pattern, read_pattern_file};
use crate::error::CliError;
use crate::output::{self, PatternRow};

/// Execute pattern command
pub fn execute(cmd: &PatternCommands, json: bool) -> Result<()> {
    let library = PatternLibrary::builtin();

    match cmd {
        PatternCommands::List => list_patterns(&library, json),
        PatternCommands::Show { pattern } => show_pattern(&library, pattern, json),
        PatternCommands::Export { pattern, output } => {
            export_pattern(&library, pattern, output.as_deref(), json)
        }
        PatternCommands::Validate { path } => validate_pattern(path, json),
        PatternCommands::Sample { pattern, at, step } => {
            sample_pattern(&library, pattern, at, *step, json)
        }
    }
}

fn list_patterns(library: &PatternLibrary, json: bool) -> Result<()> {
    let rows: Vec<PatternRow<'_>> = library
        .iter()
        .map(|(id, pattern)| PatternRow {
            id,
            name: &pattern.name,
            duration: pattern.duration,
            segments: pattern.segments.len(),
        })
        .collect();

    output::print_pattern_list(&rows, json);
    Ok(())
}

fn show_pattern(library: &PatternLibrary, source: &str, json: bool) -> Result<()> {
    let (id, pattern) = load_pattern(library, source)?;
    output::print_pattern(&id, &pattern, json);
    Ok(())
}

fn export_pattern(
    library: &PatternLibrary,
    source: &str,
    path: Option<&Path>,
    json: bool,
) -> Result<()> {
    let (id, pattern) = load_pattern(library, source)?;
    let content = to_json_pretty(&pattern).map_err(CliError::from)?;

    match path {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, content)?;
            output::print_success(
                &format!("Pattern {} exported to {}", id, path.display()),
                json,
            );
        }
        None => println!("{content}"),
    }

    Ok(())
}

fn validate_pattern(path: &Path, json: bool) -> Result<()> {
    let pattern = read_pattern_file(path)?;
    let warnings = pattern.authoring_warnings();
    output::print_validation(&pattern, &warnings, json);
    Ok(())
}

fn sample_pattern(
    library: &PatternLibrary,
    source: &str,
    at: &[f64],
    step: f64,
    json: bool,
) -> Result<()> {
    let (_, pattern) = load_pattern(library, source)?;
    let times = if at.is_empty() {
        sample_times(pattern.duration, step)?
    } else {
        at.to_vec()
    };

    let active = ActivePattern::new(pattern).map_err(CliError::from)?;
    let samples: Vec<ReferenceSample> = times
        .into_iter()
        .map(|time| {
            let value = active.query_at(time);
            ReferenceSample {
                time,
                throttle: value.throttle,
                brake: value.brake,
            }
        })
        .collect();

    output::print_samples(&active.pattern().name, &samples, json);
    Ok(())
}

/// `0, step, 2*step, ...` up to and including `duration`.
fn sample_times(duration: f64, step: f64) -> Result<Vec<f64>, CliError> {
    if !step.is_finite() || step < 1.0 / SAMPLE_RATE_HZ {
        return Err(CliError::ValidationError(format!(
            "--step must be at least one tick ({:.4}s), got {step}",
            1.0 / SAMPLE_RATE_HZ
        )));
    }

    let mut times = Vec::new();
    let mut index = 0u32;
    loop {
        let time = f64::from(index) * step;
        if time > duration + 1e-9 {
            break;
        }
        times.push(time);
        index = index.saturating_add(1);
    }
    Ok(times)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_times_include_the_end() -> Result<(), CliError> {
        let times = sample_times(2.0, 0.5)?;
        assert_eq!(times.len(), 5);
        assert!(times.iter().zip([0.0, 0.5, 1.0, 1.5, 2.0]).all(|(a, b)| (a - b).abs() < 1e-12));
        Ok(())
    }

    #[test]
    fn sample_step_must_cover_a_tick() {
        for step in [0.0, -1.0, 0.001, f64::NAN] {
            assert!(matches!(
                sample_times(8.0, step),
                Err(CliError::ValidationError(_))
            ));
        }
    }
}
