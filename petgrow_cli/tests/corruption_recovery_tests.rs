//! Corruption recovery tests for the petgrow binary.
//!
//! These tests verify the game can handle:
//! - Corrupted save files
//! - Tampered, out-of-range values
//! - Partial records from older saves

use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("petgrow"))
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn read_save(dir: &TempDir) -> serde_json::Value {
    let raw = fs::read_to_string(dir.path().join("petgrow_save.json")).unwrap();
    serde_json::from_str(&raw).expect("Save should be valid JSON")
}

#[test]
fn test_corrupted_save_file_resets() {
    let temp_dir = setup_test_dir();
    let save_path = temp_dir.path().join("petgrow_save.json");
    fs::write(&save_path, "{ invalid json }}}}").expect("Failed to write corrupted save");

    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    let save = read_save(&temp_dir);
    assert_eq!(save["name"], "Buddy");
    assert_eq!(save["coins"], 50.0);
}

#[test]
fn test_empty_save_file_resets() {
    let temp_dir = setup_test_dir();
    fs::write(temp_dir.path().join("petgrow_save.json"), "").unwrap();

    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    assert_eq!(read_save(&temp_dir)["inventory"]["basic_food"], 5);
}

#[test]
fn test_tampered_values_self_heal() {
    let temp_dir = setup_test_dir();
    let now = chrono::Utc::now().timestamp_millis();
    let tampered = serde_json::json!({
        "name": "Rex",
        "stats": { "hunger": 500.0, "hygiene": -40.0, "energy": 50.0, "happiness": 50.0, "health": 100.0 },
        "coins": -10.0,
        "care_score": 250.0,
        "last_login": now,
    });
    fs::write(temp_dir.path().join("petgrow_save.json"), tampered.to_string()).unwrap();

    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    let save = read_save(&temp_dir);
    assert_eq!(save["name"], "Rex");
    assert!(save["stats"]["hunger"].as_f64().unwrap() <= 100.0);
    assert!(save["stats"]["hygiene"].as_f64().unwrap() >= 0.0);
    assert_eq!(save["has_pooped"], true);
    assert!(save["coins"].as_f64().unwrap() >= 0.0);
    assert_eq!(save["care_score"], 100.0);
}

#[test]
fn test_partial_record_keeps_known_fields() {
    let temp_dir = setup_test_dir();
    let now = chrono::Utc::now().timestamp_millis();
    let partial = serde_json::json!({ "name": "Pip", "coins": 75.0, "last_login": now });
    fs::write(temp_dir.path().join("petgrow_save.json"), partial.to_string()).unwrap();

    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    let save = read_save(&temp_dir);
    assert_eq!(save["name"], "Pip");
    assert_eq!(save["inventory"]["premium_food"], 1);
    assert!(save["coins"].as_f64().unwrap() >= 75.0);
}
