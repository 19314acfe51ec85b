//! Persistence and recovery tests for the brutal binary.
//!
//! These tests verify the system can handle:
//! - Corrupted collection files
//! - Stored sessions that no longer make sense
//! - Config files that change session persistence

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn cli(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("brutal"));
    cmd.env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join("config"))
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(dir.join("data"));
    cmd
}

fn key_path(dir: &Path, key: &str) -> std::path::PathBuf {
    dir.join("data").join(format!("brutal-workout-{}.json", key))
}

fn write_key(dir: &Path, key: &str, contents: &str) {
    fs::create_dir_all(dir.join("data")).unwrap();
    fs::write(key_path(dir, key), contents).expect("Failed to write stored collection");
}

fn read_key(dir: &Path, key: &str) -> Value {
    let contents = fs::read_to_string(key_path(dir, key)).expect("Failed to read collection");
    serde_json::from_str(&contents).expect("Stored collection is not JSON")
}

#[test]
fn test_corrupted_exercises_fall_back_to_seed() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();
    write_key(dir, "exercises", "{ invalid json }}}}");

    cli(dir)
        .args(["exercises", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(8 of 8)"));

    // The seed replaced the unreadable file
    assert_eq!(read_key(dir, "exercises").as_array().unwrap().len(), 8);
}

#[test]
fn test_stored_empty_plan_list_is_kept() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();
    write_key(dir, "plans", "[]");

    cli(dir)
        .args(["plans", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No plans yet."));

    assert_eq!(read_key(dir, "plans"), serde_json::json!([]));
}

#[test]
fn test_user_data_survives_reload() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();
    write_key(
        dir,
        "stats",
        r#"{"totalWorkouts":3,"weeklyWorkouts":1,"totalVolume":0,"weeklyVolume":0,"streak":1,"completionRate":100}"#,
    );

    cli(dir)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total workouts:   3"))
        .stdout(predicate::str::contains("Streak:           1 days"));
}

#[test]
fn test_corrupted_session_is_ignored() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();
    write_key(dir, "session", "not a session");

    cli(dir)
        .args(["workout", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No workout in progress."));
}

#[test]
fn test_inconsistent_session_is_discarded() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();

    // Two prescriptions but only one completion row
    write_key(
        dir,
        "session",
        r#"{
            "planId": "1",
            "planName": "PUSH DAY",
            "startTime": "2026-10-16T08:00:00Z",
            "exercises": [
                { "name": "PANCA PIANA", "sets": 2, "reps": "8", "weight": 80, "restTime": 120 },
                { "name": "MILITARY PRESS", "sets": 2, "reps": "8", "weight": 50, "restTime": 120 }
            ],
            "completedSets": [[false, false]],
            "currentExercise": 0,
            "currentSet": 0,
            "isActive": true
        }"#,
    );

    cli(dir)
        .args(["workout", "set"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No workout in progress."));
}

#[test]
fn test_stored_session_resumes() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();
    write_key(
        dir,
        "session",
        r#"{
            "planId": "1",
            "planName": "PUSH DAY",
            "startTime": "2026-10-16T08:00:00Z",
            "exercises": [
                { "name": "PANCA PIANA", "sets": 2, "reps": "8", "weight": 80, "restTime": 0 }
            ],
            "completedSets": [[true, false]],
            "currentExercise": 0,
            "currentSet": 1,
            "isActive": true
        }"#,
    );

    cli(dir)
        .args(["workout", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1/2 sets (50%)"))
        // Zero rest falls back to the configured default
        .stdout(predicate::str::contains("Rest timer: 1:30"));
}

#[test]
fn test_session_not_persisted_when_disabled() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();
    let config_path = dir.join("brutal.toml");
    fs::write(&config_path, "[session]\npersist = false\n").unwrap();

    cli(dir)
        .arg("--config")
        .arg(&config_path)
        .args(["workout", "start", "1"])
        .assert()
        .success();

    assert!(!key_path(dir, "session").exists());

    cli(dir)
        .arg("--config")
        .arg(&config_path)
        .args(["workout", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No workout in progress."));
}

#[test]
fn test_custom_last_used_label() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();
    let config_path = dir.join("brutal.toml");
    fs::write(&config_path, "[plans]\nlast_used_label = \"Today\"\n").unwrap();

    cli(dir)
        .arg("--config")
        .arg(&config_path)
        .args(["workout", "start", "2"])
        .assert()
        .success();
    cli(dir)
        .arg("--config")
        .arg(&config_path)
        .args(["workout", "finish"])
        .assert()
        .success();

    let plans = read_key(dir, "plans");
    let pull_day = plans
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["id"] == "2")
        .unwrap();
    assert_eq!(pull_day["lastUsed"], "Today");
}

#[test]
fn test_invalid_config_is_reported() {
    let temp_dir = setup_test_dir();
    let dir = temp_dir.path();
    let config_path = dir.join("brutal.toml");
    fs::write(&config_path, "[timer]\ndefault_rest_seconds = 0\n").unwrap();

    cli(dir)
        .arg("--config")
        .arg(&config_path)
        .arg("stats")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}
