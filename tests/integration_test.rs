//! Integration tests for the calculator CLI.
//!
//! These tests run the actual binary over key scripts in `tests/data` and
//! inspect the JSON screen it prints.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Get path to test data file
fn test_data_path(filename: &str) -> String {
    format!("tests/data/{}", filename)
}

fn command() -> Command {
    let mut cmd = Command::cargo_bin("calculator-engine").unwrap();
    cmd.env_remove("CALCULATOR_STATE_DIR");
    cmd
}

/// Run the binary with the given script and parse the printed screen
fn run_engine(script: &str, state_dir: Option<&Path>) -> Value {
    let mut cmd = command();
    if let Some(dir) = state_dir {
        cmd.arg("--state-dir").arg(dir);
    }
    let assert = cmd.arg(script).assert().success();
    serde_json::from_slice(&assert.get_output().stdout).unwrap()
}

fn history_expressions(screen: &Value) -> Vec<String> {
    screen["history"]
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| pair[0].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_rounding_script() {
    let screen = run_engine(&test_data_path("rounding.keys"), None);
    assert_eq!(screen["current_input"], "0.3");
    assert_eq!(screen["operation"], "");
    assert_eq!(history_expressions(&screen), vec!["0.1 + 0.2"]);
}

#[test]
fn test_divide_by_zero_script() {
    let screen = run_engine(&test_data_path("divide_by_zero.keys"), None);
    assert_eq!(screen["display"], "Error");
    assert_eq!(screen["history"][0][1], "Error");
}

#[test]
fn test_chained_operators_script() {
    let screen = run_engine(&test_data_path("chain.keys"), None);
    assert_eq!(screen["current_input"], "20");
    assert_eq!(history_expressions(&screen), vec!["5 × 4", "2 + 3"]);
}

#[test]
fn test_scientific_script() {
    let screen = run_engine(&test_data_path("scientific.keys"), None);
    assert_eq!(screen["current_input"], "123");
    assert_eq!(screen["memory"], "M = 123");
    assert_eq!(screen["mode"], "Basic Mode");
    assert_eq!(history_expressions(&screen), vec!["√(9)", "x!(5)"]);
}

#[test]
fn test_display_grouping_and_theme() {
    let screen = run_engine(&test_data_path("grouping.keys"), None);
    assert_eq!(screen["display"], "1,234,567.5");
    assert_eq!(screen["current_input"], "1234567.5");
    assert_eq!(screen["theme"], "night");
}

#[test]
fn test_unknown_tokens_are_skipped() {
    let screen = run_engine(&test_data_path("unknown_token.keys"), None);
    assert_eq!(screen["current_input"], "49");
}

#[test]
fn test_state_dir_persists_history_and_theme() {
    let state = tempfile::tempdir().unwrap();

    run_engine(&test_data_path("grouping.keys"), Some(state.path()));
    run_engine(&test_data_path("chain.keys"), Some(state.path()));
    let screen = run_engine(&test_data_path("rounding.keys"), Some(state.path()));

    assert_eq!(screen["theme"], "night");
    assert_eq!(
        history_expressions(&screen),
        vec!["0.1 + 0.2", "5 × 4", "2 + 3"]
    );
    assert!(state.path().join("calculator-history").exists());
    assert_eq!(
        fs::read_to_string(state.path().join("calculator-theme")).unwrap(),
        "night"
    );
}

#[test]
fn test_state_dir_from_environment() {
    let state = tempfile::tempdir().unwrap();

    command()
        .env("CALCULATOR_STATE_DIR", state.path())
        .arg(test_data_path("chain.keys"))
        .assert()
        .success();

    assert!(state.path().join("calculator-history").exists());
}

#[test]
fn test_state_dir_flag_overrides_environment() {
    let from_env = tempfile::tempdir().unwrap();
    let from_flag = tempfile::tempdir().unwrap();

    command()
        .env("CALCULATOR_STATE_DIR", from_env.path())
        .arg("--state-dir")
        .arg(from_flag.path())
        .arg(test_data_path("chain.keys"))
        .assert()
        .success();

    assert!(from_flag.path().join("calculator-history").exists());
    assert!(!from_env.path().join("calculator-history").exists());
}

#[test]
fn test_malformed_saved_history_is_ignored() {
    let state = tempfile::tempdir().unwrap();
    fs::write(state.path().join("calculator-history"), "[{broken").unwrap();
    fs::write(state.path().join("calculator-theme"), "sepia").unwrap();

    let screen = run_engine(&test_data_path("chain.keys"), Some(state.path()));
    assert_eq!(screen["theme"], "day");
    assert_eq!(history_expressions(&screen), vec!["5 × 4", "2 + 3"]);
}

#[test]
fn test_missing_file_error() {
    command()
        .arg("nonexistent.keys")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_missing_argument_error() {
    command()
        .assert()
        .failure()
        .stderr(predicate::str::contains("<SCRIPT>"));
}

#[test]
fn test_unknown_option_error() {
    command()
        .arg("--verbose")
        .arg(test_data_path("chain.keys"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("--verbose"));
}
