use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn write_session(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let rms: Vec<f32> = (0..120)
        .map(|i| if i % 4 == 3 { 0.01 } else { 0.35 })
        .collect();
    let session = serde_json::json!({
        "rms_windows": rms,
        "peak_windows": rms.iter().map(|v| v + 0.1).collect::<Vec<f32>>(),
        "duration": 12.0,
        "transcript": {
            "text": "I will keep this short and I'm confident we can agree on the plan",
            "segments": [
                {"text": "I will keep this short", "start": 0.0, "duration": 5.0, "confidence": 0.95},
                {"text": "and I'm confident we can agree on the plan", "start": 5.0, "duration": 7.0, "confidence": 0.9}
            ]
        }
    });
    let path = dir.path().join("session.json");
    fs::write(&path, serde_json::to_string_pretty(&session).unwrap()).unwrap();
    path
}

#[test]
fn scores_a_session_file() {
    let dir = tempfile::tempdir().unwrap();
    let session = write_session(&dir);

    Command::cargo_bin("speakscore")
        .unwrap()
        .args(["--session", session.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("overall"))
        .stdout(predicate::str::contains("clarity"))
        .stdout(predicate::str::contains("words per minute"));
}

#[test]
fn json_output_is_flat_and_parseable() {
    let dir = tempfile::tempdir().unwrap();
    let session = write_session(&dir);

    let output = Command::cargo_bin("speakscore")
        .unwrap()
        .args([
            "--session",
            session.to_str().unwrap(),
            "--scenario",
            "boundaries",
            "--coach-tone",
            "executive",
            "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    for field in ["clarity", "pacing", "tone", "confidence", "overall"] {
        let score = value[field].as_u64().unwrap();
        assert!(score <= 100, "{} out of range: {}", field, score);
    }
    assert!(value["tier"].is_string());
    assert!(value["primaryStrength"].is_string());
}

#[test]
fn previous_scores_produce_a_delta() {
    let dir = tempfile::tempdir().unwrap();
    let session = write_session(&dir);
    let previous = dir.path().join("previous.json");
    fs::write(
        &previous,
        r#"{"clarity": 50, "pacing": 50, "tone": 50, "confidence": 50}"#,
    )
    .unwrap();

    Command::cargo_bin("speakscore")
        .unwrap()
        .args([
            "--session",
            session.to_str().unwrap(),
            "--previous",
            previous.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("vs previous"));
}

#[test]
fn missing_inputs_fail_with_a_clear_error() {
    Command::cargo_bin("speakscore")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("--session or --wav"));

    Command::cargo_bin("speakscore")
        .unwrap()
        .args(["--session", "/nonexistent/session.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn rejects_mismatched_metric_arrays() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(
        &path,
        r#"{"rms_windows": [0.1, 0.2], "peak_windows": [0.1], "duration": 1.0}"#,
    )
    .unwrap();

    Command::cargo_bin("speakscore")
        .unwrap()
        .args(["--session", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("same length"));
}
