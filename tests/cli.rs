use std::io::Write as _;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::tempdir;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

fn bin() -> Command {
    Command::cargo_bin("insight-metrics").expect("binary exists")
}

#[test]
fn analyze_reports_findings_for_both_rows() {
    bin()
        .args(["analyze", "-i", fixture_path("ads.csv").to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            contains("canonical_key")
                .and(contains("Campaign name"))
                .and(contains("ROAS 1\u{2013}2"))
                .and(contains("ROAS < 1")),
        );
}

#[test]
fn analyze_json_output_carries_the_full_analysis() {
    let output = bin()
        .args([
            "analyze",
            "-i",
            fixture_path("ads.csv").to_str().unwrap(),
            "--json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let parsed: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    assert_eq!(parsed["resolved_columns"]["campaign_name"], "Campaign name");
    assert_eq!(parsed["records"].as_array().expect("records").len(), 2);
    assert_eq!(parsed["records"][0]["ctr_percent"], 5.0);
    assert_eq!(
        parsed["findings"][0]["recommendation"]["priority"],
        "high"
    );
}

#[test]
fn columns_lists_the_resolved_mapping() {
    bin()
        .args(["columns", "-i", fixture_path("ads.csv").to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            contains("campaign_name")
                .and(contains("adds_to_cart"))
                .and(contains("Adds to cart")),
        );
}

#[test]
fn stats_summarizes_one_field() {
    bin()
        .args([
            "stats",
            "-i",
            fixture_path("ads.csv").to_str().unwrap(),
            "--field",
            "roas",
        ])
        .assert()
        .success()
        .stdout(
            contains("mean")
                .and(contains("1.2000"))
                .and(contains("0.4000")),
        );
}

#[test]
fn analyze_fails_on_a_header_only_file() {
    let temp = tempdir().expect("temp dir");
    let path = temp.path().join("empty.csv");
    let mut file = std::fs::File::create(&path).expect("create csv");
    writeln!(file, "Campaign name,Spend").expect("write header");
    drop(file);

    bin()
        .args(["analyze", "-i", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("at least one row"));
}
