//! CLI binary smoke tests using assert_cmd.
//!
//! These tests exercise the compiled `matsel` binary end-to-end: argument
//! parsing, error reporting, training output and the material lookup.

use std::io::Write;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("matsel").unwrap()
}

fn write_material_csv(dir: &Path) -> PathBuf {
    let path = dir.join("material.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "Su,Sy,E,G,mu,Ro,Use,Material").unwrap();
    writeln!(file, "400,250,200000,80000,0.3,7850,1,Steel").unwrap();
    for i in 1..15 {
        writeln!(
            file,
            "{},{},{},{},0.3,{},1,Steel grade {}",
            400 + 20 * i,
            250 + 10 * i,
            200000 + 1000 * i,
            80000 + 300 * i,
            7850 - 10 * i,
            i
        )
        .unwrap();
    }
    for i in 0..15 {
        writeln!(
            file,
            "{},{},{},{},0.33,{},0,Alloy {}",
            50 + 5 * i,
            25 + 2 * i,
            40000 + 500 * i,
            15000 + 150 * i,
            1600 + 30 * i,
            i
        )
        .unwrap();
    }
    path
}

// ---------------------------------------------------------------------------
// Top-level
// ---------------------------------------------------------------------------

#[test]
fn no_args_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_lists_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("train"))
        .stdout(predicate::str::contains("recommend"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("matsel"));
}

// ---------------------------------------------------------------------------
// train
// ---------------------------------------------------------------------------

#[test]
fn train_missing_csv_fails() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .args(["train", "--data"])
        .arg(dir.path().join("absent.csv"))
        .arg("--model-out")
        .arg(dir.path().join("bundle.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("CSV file not found"));
}

#[test]
fn train_bad_schema_fails() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("bad.csv");
    std::fs::write(&csv, "Su,Sy,E,G,mu,Use,Material\n1,2,3,4,5,1,Steel\n").unwrap();
    cmd()
        .args(["train", "--data"])
        .arg(&csv)
        .arg("--model-out")
        .arg(dir.path().join("bundle.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing columns in CSV: ['Ro']"));
}

#[test]
fn train_prints_metrics_and_writes_bundle() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_material_csv(dir.path());
    let bundle = dir.path().join("model").join("material_gbc.joblib");

    cmd()
        .args(["train", "--test-size", "0.3", "--random-state", "0", "--data"])
        .arg(&csv)
        .arg("--model-out")
        .arg(&bundle)
        .assert()
        .success()
        .stdout(predicate::str::contains("Metrics:"))
        .stdout(predicate::str::contains("accuracy:"))
        .stdout(predicate::str::contains("roc_auc:"))
        .stdout(predicate::str::contains("Classification report:"))
        .stdout(predicate::str::contains("weighted avg"))
        .stdout(predicate::str::contains("Saved model bundle to:"));

    assert!(bundle.exists());
}

#[test]
fn train_rejects_out_of_range_test_size() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_material_csv(dir.path());
    cmd()
        .args(["train", "--test-size", "1.5", "--data"])
        .arg(&csv)
        .arg("--model-out")
        .arg(dir.path().join("bundle.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("test_size"));
}

#[test]
fn train_reads_json_config() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_material_csv(dir.path());
    let bundle = dir.path().join("from_config.json");
    let config = dir.path().join("train.json");
    let body = serde_json::json!({
        "data": csv,
        "model_out": bundle,
        "test_size": 0.25,
        "model": { "num_boost_round": 20 }
    });
    std::fs::write(&config, body.to_string()).unwrap();

    cmd()
        .args(["train", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved model bundle to:"));
    assert!(bundle.exists());
}

// ---------------------------------------------------------------------------
// recommend
// ---------------------------------------------------------------------------

#[test]
fn recommend_lists_exact_match() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_material_csv(dir.path());
    let bundle = dir.path().join("bundle.json");

    cmd()
        .args(["train", "--data"])
        .arg(&csv)
        .arg("--model-out")
        .arg(&bundle)
        .assert()
        .success();

    cmd()
        .args(["recommend", "--model"])
        .arg(&bundle)
        .arg("--data")
        .arg(&csv)
        .args([
            "--su", "400", "--sy", "250", "--e", "200000", "--g", "80000", "--mu", "0.3", "--ro",
            "7850",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "These materials are suitable for selection: ['Steel']",
        ));
}

#[test]
fn recommend_without_bundle_fails() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_material_csv(dir.path());
    cmd()
        .args(["recommend", "--model"])
        .arg(dir.path().join("missing.json"))
        .arg("--data")
        .arg(&csv)
        .args([
            "--su", "1", "--sy", "1", "--e", "1", "--g", "1", "--mu", "1", "--ro", "1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Model bundle not found"));
}
