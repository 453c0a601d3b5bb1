//! trailbrake - Pedal Trace Trainer CLI
//!
//! Inspect reference patterns, run synthetic sessions through the scoring
//! engine and replay recorded sessions.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod completion;
mod config;
mod driver;
mod error;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::*;
use crate::config::TrainerConfig;

#[derive(Parser)]
#[command(name = "trailbrake")]
#[command(about = "Pedal Trace Trainer - Practice throttle and brake traces against reference patterns")]
#[command(version)]
#[command(long_about = "
trailbrake drives the pedal trace trainer core from the command line.
It lists and exports reference patterns, validates custom pattern files,
samples reference signals, and grades simulated or recorded sessions.

Use --json flag for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Config file (YAML)
    #[arg(long, global = true, env = "TRAILBRAKE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reference pattern commands
    #[command(subcommand)]
    Pattern(PatternCommands),

    /// Session simulation and replay commands
    #[command(subcommand)]
    Session(SessionCommands),

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("trailbrake={log_level}").into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match execute_command(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }
            ExitCode::from(error::exit_code(&e))
        }
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Pattern(cmd) => commands::pattern::execute(cmd, cli.json),
        Commands::Session(cmd) => {
            let config = TrainerConfig::load(cli.config.as_deref())?;
            commands::session::execute(cmd, cli.json, &config)
        }
        Commands::Completion { shell } => {
            completion::generate_completion(*shell);
            completion::print_completion_instructions(*shell);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    // --- Global flag parsing ---

    #[test]
    fn parse_pattern_list_defaults() -> TestResult {
        let cli = Cli::try_parse_from(["trailbrake", "pattern", "list"])?;
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
        assert!(matches!(cli.command, Commands::Pattern(PatternCommands::List)));
        Ok(())
    }

    #[test]
    fn parse_global_json_flag_either_side() -> TestResult {
        let before = Cli::try_parse_from(["trailbrake", "--json", "pattern", "list"])?;
        assert!(before.json);
        let after = Cli::try_parse_from(["trailbrake", "pattern", "list", "--json"])?;
        assert!(after.json);
        Ok(())
    }

    #[test]
    fn parse_verbose_levels() -> TestResult {
        for (args, expected) in [
            (vec!["trailbrake", "pattern", "list"], 0),
            (vec!["trailbrake", "-v", "pattern", "list"], 1),
            (vec!["trailbrake", "-vv", "pattern", "list"], 2),
            (vec!["trailbrake", "-vvv", "pattern", "list"], 3),
        ] {
            let cli = Cli::try_parse_from(args)?;
            assert_eq!(cli.verbose, expected);
        }
        Ok(())
    }

    #[test]
    fn parse_config_flag() -> TestResult {
        let cli = Cli::try_parse_from([
            "trailbrake",
            "--config",
            "trainer.yaml",
            "session",
            "simulate",
        ])?;
        assert_eq!(cli.config, Some(PathBuf::from("trainer.yaml")));
        Ok(())
    }

    // --- Pattern command parsing ---

    #[test]
    fn parse_pattern_export_output() -> TestResult {
        let cli = Cli::try_parse_from([
            "trailbrake",
            "pattern",
            "export",
            "hairpin",
            "--output",
            "hairpin.json",
        ])?;
        match &cli.command {
            Commands::Pattern(PatternCommands::Export { pattern, output }) => {
                assert_eq!(pattern, "hairpin");
                assert_eq!(output.as_deref(), Some(std::path::Path::new("hairpin.json")));
            }
            _ => return Err("expected Pattern Export command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_pattern_sample_times() -> TestResult {
        let cli = Cli::try_parse_from([
            "trailbrake",
            "pattern",
            "sample",
            "trail-braking",
            "--at",
            "0",
            "2.45",
            "-1",
        ])?;
        match &cli.command {
            Commands::Pattern(PatternCommands::Sample { pattern, at, step }) => {
                assert_eq!(pattern, "trail-braking");
                assert_eq!(at.len(), 3);
                assert!((step - 0.5).abs() < f64::EPSILON);
            }
            _ => return Err("expected Pattern Sample command".into()),
        }
        Ok(())
    }

    // --- Session command parsing ---

    #[test]
    fn parse_session_simulate_overrides() -> TestResult {
        let cli = Cli::try_parse_from([
            "trailbrake",
            "session",
            "simulate",
            "classic-lap",
            "--lag",
            "0.3",
            "--tolerance",
            "10",
            "--record",
            "lap.json",
        ])?;
        match &cli.command {
            Commands::Session(SessionCommands::Simulate {
                pattern,
                lag,
                gain,
                tolerance,
                record,
                ..
            }) => {
                assert_eq!(pattern.as_deref(), Some("classic-lap"));
                assert_eq!(*lag, Some(0.3));
                assert!(gain.is_none());
                assert_eq!(*tolerance, Some(10.0));
                assert_eq!(record.as_deref(), Some(std::path::Path::new("lap.json")));
            }
            _ => return Err("expected Session Simulate command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_session_replay() -> TestResult {
        let cli = Cli::try_parse_from(["trailbrake", "session", "replay", "lap.json", "-t", "5"])?;
        match &cli.command {
            Commands::Session(SessionCommands::Replay { path, tolerance }) => {
                assert_eq!(path, &PathBuf::from("lap.json"));
                assert_eq!(*tolerance, Some(5.0));
            }
            _ => return Err("expected Session Replay command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_completion_bash() -> TestResult {
        let cli = Cli::try_parse_from(["trailbrake", "completion", "bash"])?;
        assert!(matches!(cli.command, Commands::Completion { .. }));
        Ok(())
    }

    // --- Rejection / error cases ---

    #[test]
    fn reject_no_subcommand() {
        let result = Cli::try_parse_from(["trailbrake"]);
        assert!(result.is_err());
    }

    #[test]
    fn reject_unknown_subcommand() {
        let result = Cli::try_parse_from(["trailbrake", "nonexistent"]);
        assert!(result.is_err());
    }

    #[test]
    fn reject_missing_validate_path() {
        let result = Cli::try_parse_from(["trailbrake", "pattern", "validate"]);
        assert!(result.is_err());
    }

    #[test]
    fn reject_non_numeric_tolerance() {
        let result =
            Cli::try_parse_from(["trailbrake", "session", "simulate", "--tolerance", "tight"]);
        assert!(result.is_err());
    }

    #[test]
    fn reject_missing_completion_shell() {
        let result = Cli::try_parse_from(["trailbrake", "completion"]);
        assert!(result.is_err());
    }
}
