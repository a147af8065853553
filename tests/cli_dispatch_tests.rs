use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_dogfight")
}

fn unique_temp_path(name: &str, ext: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("dogfight-{name}-{stamp}.{ext}"))
}

#[test]
fn simulate_command_prints_tallies() {
    let output = Command::new(bin())
        .args(["simulate", "50", "11"])
        .output()
        .expect("simulate should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Side A wins:"));
    assert!(stdout.contains("Side B wins:"));
    assert!(stdout.contains("Draws:"));
}

#[test]
fn simulate_json_is_reproducible_for_a_seed() {
    let run = || {
        let output = Command::new(bin())
            .args(["simulate", "80", "5", "--json", "--workers", "2"])
            .output()
            .expect("simulate should run");
        assert_eq!(output.status.code(), Some(0));
        let payload: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("simulate should emit json");
        payload
    };
    let first = run();
    assert_eq!(first["trials"], 80);
    let results = &first["results"];
    let total = results["side_a_wins"].as_u64().unwrap_or_default()
        + results["side_b_wins"].as_u64().unwrap_or_default()
        + results["draws"].as_u64().unwrap_or_default();
    assert_eq!(total, 80);
    assert_eq!(first, run());
}

#[test]
fn simulate_rejects_unknown_action() {
    let output = Command::new(bin())
        .args(["simulate", "10", "1", "--a-action", "barrel-roll"])
        .output()
        .expect("simulate should run");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn trace_command_emits_event_list() {
    let output = Command::new(bin())
        .args(["trace", "3"])
        .output()
        .expect("trace should run");

    assert_eq!(output.status.code(), Some(0));
    let payload: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("trace should emit json");
    let events = payload.as_array().expect("event list");
    assert!(!events.is_empty());
    assert_eq!(events.last().map(|e| e["event"].clone()), Some("round_ended".into()));
}

#[test]
fn validate_command_returns_usage_without_path() {
    let output = Command::new(bin())
        .arg("validate")
        .output()
        .expect("validate should run");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: dogfight validate"));
}

#[test]
fn validate_command_accepts_valid_roster() {
    let path = unique_temp_path("valid", "yaml");
    fs::write(
        &path,
        "side_a:\n  - { name: A, priority: 1, attack: 2, defense: 2, hull: 3 }\nside_b:\n  - { name: B, priority: 1, attack: 2, defense: 2, hull: 3, count: 2 }\n",
    )
    .expect("fixture should be written");

    let output = Command::new(bin())
        .args(["validate", path.to_string_lossy().as_ref()])
        .output()
        .expect("validate should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("validation passed"));
    assert!(stdout.contains("3 ships"));

    let _ = fs::remove_file(path);
}

#[test]
fn validate_command_returns_non_zero_on_invalid_roster() {
    let path = unique_temp_path("invalid", "json");
    fs::write(
        &path,
        r#"{"side_a": [{"name": "", "priority": 1, "attack": 1, "defense": 1, "hull": 0}], "side_b": []}"#,
    )
    .expect("fixture should be written");

    let output = Command::new(bin())
        .args(["validate", path.to_string_lossy().as_ref()])
        .output()
        .expect("validate should run");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("validation failed: 3 issue(s)"));

    let _ = fs::remove_file(path);
}

#[test]
fn unknown_command_prints_usage() {
    let output = Command::new(bin()).output().expect("binary should run");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: dogfight"));
}
