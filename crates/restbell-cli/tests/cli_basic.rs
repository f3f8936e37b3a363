//! Basic CLI E2E tests.
//!
//! Each test points RESTBELL_CONFIG_DIR at its own temp directory so
//! runs are hermetic and parallel-safe. Commands that need audio
//! hardware are not exercised here.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Run the CLI against an isolated config dir and return output.
fn run_cli(dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_restbell"))
        .env("RESTBELL_CONFIG_DIR", dir)
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_config_list_is_valid_json() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["config", "list"]);
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["slots"].as_array().unwrap().len(), 5);
    assert_eq!(json["notifications"]["desktop"], serde_json::json!(false));
}

#[test]
fn test_first_run_writes_config_file() {
    let dir = TempDir::new().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["config", "list"]);
    assert_eq!(code, 0);
    assert!(dir.path().join("config.toml").is_file());
}

#[test]
fn test_config_get_set_roundtrip() {
    let dir = TempDir::new().unwrap();
    let (_, _, code) = run_cli(
        dir.path(),
        &["config", "set", "notifications.desktop", "true"],
    );
    assert_eq!(code, 0);
    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "notifications.desktop"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "true");
}

#[test]
fn test_config_seed_set_and_clear() {
    let dir = TempDir::new().unwrap();
    run_cli(dir.path(), &["config", "set", "notifications.seed", "42"]);
    let (stdout, _, _) = run_cli(dir.path(), &["config", "get", "notifications.seed"]);
    assert_eq!(stdout.trim(), "42");
    run_cli(dir.path(), &["config", "set", "notifications.seed", "null"]);
    let (stdout, _, _) = run_cli(dir.path(), &["config", "get", "notifications.seed"]);
    assert_eq!(stdout.trim(), "null");
}

#[test]
fn test_config_rejects_unknown_key() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["config", "set", "no.such.key", "1"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Unknown configuration key"));
}

#[test]
fn test_config_set_rejects_out_of_range_slot_values() {
    let dir = TempDir::new().unwrap();
    // Whole-array replacement goes through slot validation.
    let (_, stderr, code) = run_cli(
        dir.path(),
        &[
            "config",
            "set",
            "slots",
            r#"[{"category":"eye","enabled":true,"volume":5.0,"duration_min":20.0}]"#,
        ],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("Invalid"));
}

#[test]
fn test_slot_list_shows_defaults() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["slot", "list"]);
    assert_eq!(code, 0);
    for name in ["eye", "sit", "drinkwater", "warm", "history"] {
        assert!(stdout.contains(name), "missing {name} in:\n{stdout}");
    }
    assert!(stdout.contains("20:00"));
    assert!(stdout.contains("45:00"));
}

#[test]
fn test_slot_set_duration_accepts_mmss() {
    let dir = TempDir::new().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["slot", "set", "0", "--duration", "12:30"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(dir.path(), &["slot", "list", "--json"]);
    let slots: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(slots[0]["duration_min"], serde_json::json!(12.5));
}

#[test]
fn test_slot_set_rejects_bad_durations() {
    let dir = TempDir::new().unwrap();
    for bad in ["0", "61", "12:61", "abc"] {
        let (_, stderr, code) = run_cli(dir.path(), &["slot", "set", "0", "--duration", bad]);
        assert_ne!(code, 0, "duration '{bad}' unexpectedly accepted");
        assert!(stderr.contains("error:"), "no error output for '{bad}'");
    }
}

#[test]
fn test_slot_set_rejects_bad_volume_and_index() {
    let dir = TempDir::new().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["slot", "set", "0", "--volume", "1.5"]);
    assert_ne!(code, 0);
    let (_, stderr, code) = run_cli(dir.path(), &["slot", "set", "9", "--enabled", "true"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("out of range"));
}

#[test]
fn test_slot_add_and_remove() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["slot", "add", "eye", "--duration", "0:30"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("added slot 5"));

    let (stdout, _, _) = run_cli(dir.path(), &["slot", "list", "--json"]);
    let slots: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(slots.as_array().unwrap().len(), 6);
    assert_eq!(slots[5]["duration_min"], serde_json::json!(0.5));

    let (_, _, code) = run_cli(dir.path(), &["slot", "remove", "5"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(dir.path(), &["slot", "list", "--json"]);
    let slots: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(slots.as_array().unwrap().len(), 5);
}

#[test]
fn test_slot_rejects_unknown_category() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["slot", "set", "0", "--category", "bogus"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("bogus"));
}

#[test]
fn test_sounds_list_reports_missing_files() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["sounds", "list"]);
    assert_eq!(code, 0);
    // A fresh config dir has no clip files on disk.
    assert!(stdout.contains("missing"));
    assert!(stdout.contains("0 of 2 loaded"));
    assert!(stdout.contains("0 of 4 loaded"));
}

#[test]
fn test_test_command_checks_slot_index() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["test", "9"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("out of range"));
}

#[test]
fn test_test_command_skips_disabled_slot() {
    let dir = TempDir::new().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["slot", "set", "1", "--enabled", "false"]);
    assert_eq!(code, 0);
    let (stdout, _, code) = run_cli(dir.path(), &["test", "1"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("disabled"));
}

#[test]
fn test_config_reset_restores_defaults() {
    let dir = TempDir::new().unwrap();
    run_cli(dir.path(), &["slot", "set", "0", "--duration", "1"]);
    let (_, _, code) = run_cli(dir.path(), &["config", "reset"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(dir.path(), &["slot", "list", "--json"]);
    let slots: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(slots[0]["duration_min"], serde_json::json!(20.0));
}

#[test]
fn test_config_path_points_into_config_dir() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["config", "path"]);
    assert_eq!(code, 0);
    assert!(stdout.trim().ends_with("config.toml"));
    assert!(stdout.contains(dir.path().to_str().unwrap()));
}
