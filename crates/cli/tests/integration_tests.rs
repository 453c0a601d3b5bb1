//! Integration tests for the trailbrake CLI
//!
//! Each test runs the real binary with an isolated config directory, so a
//! config file on the developer's machine cannot change the results.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Custom predicate to check if output is valid JSON
fn is_json() -> impl predicates::Predicate<[u8]> {
    predicates::function::function(|s: &[u8]| {
        if let Ok(text) = std::str::from_utf8(s) {
            serde_json::from_str::<Value>(text).is_ok()
        } else {
            false
        }
    })
}

/// A trailbrake command that ignores any per-user config.
fn trailbrake(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("trailbrake").unwrap();
    cmd.env_remove("TRAILBRAKE_CONFIG")
        .env_remove("RUST_LOG")
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("NO_COLOR", "1");
    cmd
}

fn json_output(cmd: &mut Command) -> Value {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn stacked_pattern(dir: &TempDir) -> PathBuf {
    let pattern = serde_json::json!({
        "name": "Stacked",
        "duration": 2.0,
        "segments": [
            { "timeRange": [0.0, 2.0], "throttle": [0.0, 0.0], "brake": [100.0, 100.0] },
            { "timeRange": [0.5, 1.5], "throttle": [0.0, 0.0], "brake": [100.0, 100.0] }
        ]
    });
    write_file(dir, "stacked.json", &serde_json::to_string_pretty(&pattern).unwrap())
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_cli_help() {
    let home = TempDir::new().unwrap();
    trailbrake(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("pedal trace trainer"));
}

#[test]
fn test_cli_version() {
    let home = TempDir::new().unwrap();
    trailbrake(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("trailbrake"));
}

#[test]
fn test_completion_generation() {
    let home = TempDir::new().unwrap();
    trailbrake(&home)
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_trailbrake"));
}

// Pattern commands

#[test]
fn test_pattern_list_human_output() {
    let home = TempDir::new().unwrap();
    trailbrake(&home)
        .args(["pattern", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Available Patterns"))
        .stdout(predicate::str::contains("threshold-braking"));
}

#[test]
fn test_pattern_list_json_output() {
    let home = TempDir::new().unwrap();
    trailbrake(&home)
        .args(["--json", "pattern", "list"])
        .assert()
        .success()
        .stdout(is_json());

    let json = json_output(trailbrake(&home).args(["--json", "pattern", "list"]));
    assert_eq!(json["success"], true);
    let patterns = json["patterns"].as_array().unwrap();
    assert_eq!(patterns.len(), 5);
    assert_eq!(patterns[0]["id"], "threshold-braking");
}

#[test]
fn test_pattern_show_json() {
    let home = TempDir::new().unwrap();
    let json = json_output(trailbrake(&home).args(["pattern", "show", "trail-braking", "--json"]));
    assert_eq!(json["id"], "trail-braking");
    assert_eq!(json["pattern"]["name"], "Trail Braking");
    assert!(json["pattern"]["segments"][0]["timeRange"].is_array());
}

#[test]
fn test_pattern_show_unknown_exits_not_found() {
    let home = TempDir::new().unwrap();
    trailbrake(&home)
        .args(["pattern", "show", "no-such-pattern"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Pattern not found"));
}

#[test]
fn test_pattern_export_then_validate() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("exports").join("hairpin.json");

    trailbrake(&home)
        .args(["pattern", "export", "hairpin", "--output", path_arg(&out)])
        .assert()
        .success();
    assert!(out.exists());

    let json = json_output(trailbrake(&home).args(["--json", "pattern", "validate", path_arg(&out)]));
    assert_eq!(json["pattern"], "Hairpin");
    assert_eq!(json["warnings"].as_array().unwrap().len(), 0);
}

#[test]
fn test_pattern_export_to_stdout_is_pattern_json() {
    let home = TempDir::new().unwrap();
    let output = trailbrake(&home)
        .args(["pattern", "export", "classic-lap"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["name"], "Classic Lap");
    assert_eq!(json["duration"], 10.0);
}

#[test]
fn test_pattern_validate_reports_overlap_warnings() {
    let home = TempDir::new().unwrap();
    let path = stacked_pattern(&home);

    let json = json_output(trailbrake(&home).args(["--json", "pattern", "validate", path_arg(&path)]));
    let warnings = json["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["kind"], "overflow");
    assert_eq!(warnings[0]["channel"], "brake");
    assert_eq!(warnings[0]["peak"], 200.0);

    trailbrake(&home)
        .args(["pattern", "validate", path_arg(&path)])
        .assert()
        .success()
        .stdout(predicate::str::contains("will be clamped to 100"));
}

#[test]
fn test_pattern_validate_reports_doubled_handoff() {
    let home = TempDir::new().unwrap();
    let pattern = serde_json::json!({
        "name": "Handoff",
        "duration": 2.0,
        "segments": [
            { "timeRange": [0.0, 1.0], "throttle": [0.0, 0.0], "brake": [0.0, 60.0] },
            { "timeRange": [1.0, 2.0], "throttle": [0.0, 0.0], "brake": [60.0, 0.0] }
        ]
    });
    let path = write_file(&home, "handoff.json", &pattern.to_string());

    let json = json_output(trailbrake(&home).args(["--json", "pattern", "validate", path_arg(&path)]));
    let warnings = json["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["kind"], "doubledHandoff");
    assert_eq!(warnings[0]["start"], 1.0);
    assert_eq!(warnings[0]["peak"], 120.0);
}

#[test]
fn test_pattern_validate_malformed_json() {
    let home = TempDir::new().unwrap();
    let path = write_file(&home, "broken.json", "{\"name\": ");

    trailbrake(&home)
        .args(["pattern", "validate", path_arg(&path)])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Malformed pattern JSON"));
}

#[test]
fn test_pattern_validate_invalid_pattern_json_error() {
    let home = TempDir::new().unwrap();
    let path = write_file(
        &home,
        "reversed.json",
        r#"{"name":"Bad","duration":2,"segments":[{"timeRange":[1.5,0.5],"throttle":[0,0],"brake":[0,50]}]}"#,
    );

    let output = trailbrake(&home)
        .args(["--json", "pattern", "validate", path_arg(&path)])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["success"], false);
    assert!(
        json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("segments[0].timeRange")
    );
}

#[test]
fn test_pattern_validate_missing_file() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("missing.json");
    trailbrake(&home)
        .args(["pattern", "validate", path_arg(&path)])
        .assert()
        .code(3);
}

#[test]
fn test_pattern_sample_at_times() {
    let home = TempDir::new().unwrap();
    let json = json_output(trailbrake(&home).args([
        "--json",
        "pattern",
        "sample",
        "trail-braking",
        "--at",
        "-1",
        "2.45",
    ]));
    let samples = json["samples"].as_array().unwrap();
    assert_eq!(samples.len(), 2);
    assert_eq!(samples[0]["throttle"], 0.0);
    assert_eq!(samples[0]["brake"], 0.0);
    assert!(samples[1]["throttle"].as_f64().unwrap() > 10.0);
    assert!(samples[1]["brake"].as_f64().unwrap() > 10.0);
}

#[test]
fn test_pattern_sample_with_step() {
    let home = TempDir::new().unwrap();
    let json = json_output(trailbrake(&home).args([
        "--json",
        "pattern",
        "sample",
        "threshold-braking",
        "--step",
        "1",
    ]));
    assert_eq!(json["samples"].as_array().unwrap().len(), 9);
}

// Session commands

#[test]
fn test_session_simulate_defaults() {
    let home = TempDir::new().unwrap();
    let json = json_output(trailbrake(&home).args(["--json", "session", "simulate"]));
    assert_eq!(json["pattern"], "threshold-braking");
    assert_eq!(json["tolerance"], 15.0);
    assert_eq!(json["summary"]["totalSamples"], 480);
    assert!(json["summary"]["grade"].is_string());
    assert!(json["live"]["meanDeviation"].is_number());
}

#[test]
fn test_session_simulate_human_output() {
    let home = TempDir::new().unwrap();
    trailbrake(&home)
        .args(["session", "simulate", "hairpin", "--lag", "0.3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Grade:"))
        .stdout(predicate::str::contains("Samples: 540"));
}

#[test]
fn test_session_simulate_rejects_bad_tolerance() {
    let home = TempDir::new().unwrap();
    trailbrake(&home)
        .args(["session", "simulate", "--tolerance", "0"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("tolerance must be a positive number"));
}

#[test]
fn test_session_record_and_replay() {
    let home = TempDir::new().unwrap();
    let record = home.path().join("sessions").join("lap.json");

    let simulated = json_output(trailbrake(&home).args([
        "--json",
        "session",
        "simulate",
        "classic-lap",
        "--record",
        path_arg(&record),
    ]));
    assert!(record.exists());

    let replayed =
        json_output(trailbrake(&home).args(["--json", "session", "replay", path_arg(&record)]));
    assert_eq!(replayed["consistent"], true);
    assert_eq!(replayed["pattern"], "Classic Lap");
    assert_eq!(replayed["recomputed"], simulated["summary"]);
    assert_eq!(replayed["stored"], simulated["summary"]);
}

#[test]
fn test_session_replay_with_new_tolerance() {
    let home = TempDir::new().unwrap();
    let record = home.path().join("lap.json");
    trailbrake(&home)
        .args(["session", "simulate", "--record", path_arg(&record), "--lag", "0.5"])
        .assert()
        .success();

    let replayed = json_output(trailbrake(&home).args([
        "--json",
        "session",
        "replay",
        path_arg(&record),
        "--tolerance",
        "1",
    ]));
    assert_eq!(replayed["tolerance"], 1.0);
    assert_eq!(
        replayed["recomputed"]["meanDeviation"],
        replayed["stored"]["meanDeviation"]
    );
    assert_eq!(replayed["consistent"], true);
}

#[test]
fn test_session_replay_rejects_tampered_record() {
    let home = TempDir::new().unwrap();
    let record = home.path().join("lap.json");
    trailbrake(&home)
        .args(["session", "simulate", "--record", path_arg(&record)])
        .assert()
        .success();

    let mut json: Value = serde_json::from_str(&fs::read_to_string(&record).unwrap()).unwrap();
    json["samples"][10]["time"] = Value::from(-1.0);
    fs::write(&record, serde_json::to_string(&json).unwrap()).unwrap();

    trailbrake(&home)
        .args(["session", "replay", path_arg(&record)])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("samples[10]"));
}

// Configuration

#[test]
fn test_config_file_sets_defaults() {
    let home = TempDir::new().unwrap();
    let config = write_file(
        &home,
        "trainer.yaml",
        "tolerance: 8\ndefault_pattern: hairpin\nsimulation:\n  jitter: 0\n",
    );

    let json = json_output(trailbrake(&home).args([
        "--json",
        "--config",
        path_arg(&config),
        "session",
        "simulate",
    ]));
    assert_eq!(json["pattern"], "hairpin");
    assert_eq!(json["tolerance"], 8.0);
    assert_eq!(json["summary"]["totalSamples"], 540);
}

#[test]
fn test_config_from_environment() {
    let home = TempDir::new().unwrap();
    let config = write_file(&home, "env.yaml", "default_pattern: throttle-control\n");

    let json = json_output(
        trailbrake(&home)
            .env("TRAILBRAKE_CONFIG", &config)
            .args(["--json", "session", "simulate"]),
    );
    assert_eq!(json["pattern"], "throttle-control");
}

#[test]
fn test_unknown_default_pattern_falls_back() {
    let home = TempDir::new().unwrap();
    let config = write_file(&home, "fallback.yaml", "default_pattern: drifting\n");

    let json = json_output(trailbrake(&home).args([
        "--json",
        "--config",
        path_arg(&config),
        "session",
        "simulate",
    ]));
    assert_eq!(json["pattern"], "threshold-braking");
}

#[test]
fn test_invalid_config_is_rejected() {
    let home = TempDir::new().unwrap();
    let config = write_file(&home, "bad.yaml", "tolerence: 10\n");
    trailbrake(&home)
        .args(["--config", path_arg(&config), "session", "simulate"])
        .assert()
        .code(4);
}

#[test]
fn test_missing_config_file() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("nope.yaml");
    trailbrake(&home)
        .args(["--config", path_arg(&config), "session", "simulate"])
        .assert()
        .code(3);
}
