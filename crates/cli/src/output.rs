//! Output formatting for CLI responses

use anyhow::Error;
use colored::*;
use serde::Serialize;
use serde_json::{Value, json};
use trailbrake_pattern::{AuthoringWarning, Pattern, PatternError, ReferenceSample};
use trailbrake_scoring::{Grade, RecordError, SessionSummary};

use crate::error::CliError;

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "type": error_type_name(error)
        }
    });
    print_json(&error_json, "error");
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

/// Print a `{"success": true, ...}` envelope around `fields`.
pub fn print_envelope(fields: Value) {
    let mut output = json!({ "success": true });
    if let (Some(target), Value::Object(extra)) = (output.as_object_mut(), fields) {
        target.extend(extra);
    }
    print_json(&output, "response");
}

/// Summary row for `pattern list`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub duration: f64,
    pub segments: usize,
}

/// Print the pattern library
pub fn print_pattern_list(rows: &[PatternRow<'_>], json: bool) {
    if json {
        print_envelope(json!({ "patterns": rows }));
        return;
    }

    if rows.is_empty() {
        println!("{}", "No patterns available".yellow());
        return;
    }

    println!("{}", "Available Patterns:".bold());
    for row in rows {
        println!(
            "  {} {} ({}) {:.1}s, {} segments",
            "●".green(),
            row.name.bold(),
            row.id.dimmed(),
            row.duration,
            row.segments
        );
    }
}

/// Print one pattern with its segments
pub fn print_pattern(id: &str, pattern: &Pattern, json: bool) {
    if json {
        print_envelope(json!({ "id": id, "pattern": pattern }));
        return;
    }

    println!("{} {} ({})", "Pattern:".bold(), pattern.name, id.dimmed());
    println!("  Duration: {:.2}s", pattern.duration);
    if !pattern.description.is_empty() {
        println!("  {}", pattern.description.italic());
    }

    println!("  {}:", "Segments".bold());
    println!(
        "    {:>6} {:>6}  {:>13}  {:>13}  Label",
        "Start", "End", "Throttle", "Brake"
    );
    for segment in &pattern.segments {
        println!(
            "    {:>6.2} {:>6.2}  {:>5.1} -> {:>5.1}  {:>5.1} -> {:>5.1}  {}",
            segment.time_range.start,
            segment.time_range.end,
            segment.throttle.start,
            segment.throttle.end,
            segment.brake.start,
            segment.brake.end,
            segment.label.cyan()
        );
    }
}

/// Print reference values at requested times
pub fn print_samples(name: &str, samples: &[ReferenceSample], json: bool) {
    if json {
        print_envelope(json!({ "pattern": name, "samples": samples }));
        return;
    }

    println!("{} {}", "Reference:".bold(), name);
    println!("  {:>8}  {:>8}  {:>8}", "Time", "Throttle", "Brake");
    for sample in samples {
        println!(
            "  {:>8.3}  {}  {}",
            sample.time,
            format!("{:>8.2}", sample.throttle).green(),
            format!("{:>8.2}", sample.brake).red()
        );
    }
}

/// Print the result of validating a pattern file
pub fn print_validation(pattern: &Pattern, warnings: &[AuthoringWarning], json: bool) {
    if json {
        print_envelope(json!({
            "pattern": pattern.name,
            "segments": pattern.segments.len(),
            "warnings": warnings
        }));
        return;
    }

    print_success(
        &format!(
            "{} is valid ({} segments, {:.2}s)",
            pattern.name,
            pattern.segments.len(),
            pattern.duration
        ),
        false,
    );
    for warning in warnings {
        print_warning(&warning.to_string(), false);
    }
}

/// Print a session summary
pub fn print_summary(title: &str, summary: &SessionSummary) {
    println!("{} {}", "Session:".bold(), title);
    if summary.is_empty() {
        println!("  {}", "No samples recorded".yellow());
        return;
    }

    println!("  Grade: {}", color_grade(summary.grade));
    println!("  Mean Deviation: {:.2}", summary.mean_deviation);
    println!(
        "  P50 / P95: {:.2} / {:.2}",
        summary.p50_deviation, summary.p95_deviation
    );
    println!(
        "  Timing: {:+.1} ({})",
        summary.timing_offset,
        timing_hint(summary.timing_offset)
    );
    println!("  Smoothness: {:.1}", summary.smoothness);
    println!("  Samples: {}", summary.total_samples);
}

fn color_grade(grade: Grade) -> ColoredString {
    match grade {
        Grade::APlus | Grade::A => grade.as_str().green().bold(),
        Grade::B | Grade::C => grade.as_str().yellow().bold(),
        Grade::D | Grade::F => grade.as_str().red().bold(),
        Grade::NotAvailable => grade.as_str().dimmed(),
    }
}

/// Rough direction of the mean timing signal.
pub fn timing_hint(offset: f64) -> &'static str {
    if offset > 5.0 {
        "braking late"
    } else if offset < -5.0 {
        "braking early"
    } else {
        "on time"
    }
}

/// Print success message
pub fn print_success(message: &str, json: bool) {
    if json {
        print_envelope(json!({ "message": message }));
    } else {
        println!("{} {}", "✓".green(), message);
    }
}

/// Print warning message
pub fn print_warning(message: &str, json: bool) {
    if json {
        print_envelope(json!({ "warning": message }));
    } else {
        println!("{} {}", "⚠".yellow(), message);
    }
}

fn print_json(value: &Value, what: &str) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format {what} as JSON: {e}"),
    }
}

/// Get error type name for JSON output
fn error_type_name(error: &Error) -> String {
    let debug = if let Some(err) = error.downcast_ref::<CliError>() {
        format!("{err:?}")
    } else if let Some(err) = error.downcast_ref::<PatternError>() {
        format!("{err:?}")
    } else if let Some(err) = error.downcast_ref::<RecordError>() {
        format!("{err:?}")
    } else {
        return "Error".to_string();
    };

    debug
        .split(['(', ' ', '{'])
        .next()
        .unwrap_or("Unknown")
        .to_string()
}
