//! Integration tests for the ebbnote CLI
//!
//! These tests run the ebbnote binary against a throwaway store.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

const DAY: Duration = Duration::from_secs(86_400);

/// Get a Command for ebbnote with no editor configured
fn ebbnote() -> Command {
    let mut cmd = cargo_bin_cmd!("ebbnote");
    cmd.env_remove("EDITOR")
        .env_remove("VISUAL")
        .env_remove("EBBNOTE_CONFIG")
        .env_remove("EBBNOTE_LOG")
        .env_remove("RUST_LOG");
    cmd
}

/// Write a config whose store lives in `<dir>/answers`
fn write_config(dir: &Path, target_days: &str) -> PathBuf {
    let path = dir.join("config.toml");
    fs::write(
        &path,
        format!("[review]\ntarget_days = \"{}\"\n", target_days),
    )
    .unwrap();
    path
}

/// Create `answers/<subject>/<content>.md` last modified `days_ago` days ago
fn write_note(dir: &Path, subject: &str, content: &str, days_ago: u32) {
    let subject_dir = dir.join("answers").join(subject);
    fs::create_dir_all(&subject_dir).unwrap();
    let path = subject_dir.join(format!("{}.md", content));
    fs::write(&path, format!("## {}\n", content)).unwrap();

    let file = fs::File::options().write(true).open(&path).unwrap();
    file.set_modified(SystemTime::now() - DAY * days_ago).unwrap();
}

fn read_export(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join("answers").join(name)).unwrap()
}

// ============================================================================
// Help and version
// ============================================================================

#[test]
fn test_help_flag() {
    ebbnote()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: ebbnote"))
        .stdout(predicate::str::contains("new"))
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("due"));
}

#[test]
fn test_version_flag() {
    ebbnote()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ebbnote"));
}

#[test]
fn test_unknown_argument_json_usage_error() {
    ebbnote()
        .args(["--format", "json", "due", "--bogus-flag"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("\"type\":\"usage_error\""));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_missing_config_is_created_with_defaults() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");

    ebbnote()
        .args(["--config", config.to_str().unwrap(), "export"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created default config"));

    let text = fs::read_to_string(&config).unwrap();
    assert!(text.contains("target_days = \"0,1,2,4,7,15,30,60,120,240\""));
    assert!(dir.path().join("answers").is_dir());
    assert!(dir.path().join("answers/export.md").exists());
}

#[test]
fn test_config_from_env() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), "0");

    ebbnote()
        .env("EBBNOTE_CONFIG", &config)
        .arg("export")
        .assert()
        .success();

    assert!(dir.path().join("answers/allExport.md").exists());
}

#[test]
fn test_negative_schedule_is_config_error() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), "0,-1");

    ebbnote()
        .args(["--config", config.to_str().unwrap(), "export"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("non-negative"));

    assert!(!dir.path().join("answers/export.md").exists());
}

#[test]
fn test_malformed_config_json_envelope() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[review\n").unwrap();

    ebbnote()
        .args(["--config", config.to_str().unwrap(), "--format", "json", "due"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("\"type\":\"invalid_config\""));
}

// ============================================================================
// Exports
// ============================================================================

#[test]
fn test_empty_store_exports_heading_only() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), "0,1,2");

    ebbnote()
        .args(["--config", config.to_str().unwrap(), "export"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(0 due of 0 notes)"));

    let due = read_export(dir.path(), "export.md");
    assert_eq!(due.lines().count(), 1);
    assert!(due.starts_with("## "));
    assert_eq!(read_export(dir.path(), "allExport.md"), "## All\n");
}

#[test]
fn test_due_notes_grouped_by_subject() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), "0,4");
    write_note(dir.path(), "Math", "A", 0);
    write_note(dir.path(), "Art", "B", 4);

    ebbnote()
        .args(["--config", config.to_str().unwrap(), "export"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(2 due of 2 notes)"));

    let due = read_export(dir.path(), "export.md");
    assert!(due.contains("### [Math](Math)\n- [A](Math/A.md)\n"));
    assert!(due.contains("### [Art](Art)\n- [B](Art/B.md)\n"));
}

#[test]
fn test_off_schedule_note_only_in_complete_export() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), "1,2");
    write_note(dir.path(), "Math", "Old", 3);

    ebbnote()
        .args(["--config", config.to_str().unwrap(), "export"])
        .assert()
        .success();

    assert!(!read_export(dir.path(), "export.md").contains("Old"));
    assert!(read_export(dir.path(), "allExport.md").contains("- [Old](Math/Old.md)"));
}

#[test]
fn test_export_json_summary() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), "0");
    write_note(dir.path(), "Math", "A", 0);
    write_note(dir.path(), "Math", "B", 2);

    let output = ebbnote()
        .args(["--config", config.to_str().unwrap(), "--format", "json", "export"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["due"], 1);
    assert_eq!(json["total"], 2);
}

#[test]
fn test_due_prints_due_notes() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), "7");
    write_note(dir.path(), "Math", "Week", 7);
    write_note(dir.path(), "Math", "Fresh", 0);

    ebbnote()
        .args(["--config", config.to_str().unwrap(), "due"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- [Week](Math/Week.md)"))
        .stdout(predicate::str::contains("Fresh").not());
}

// ============================================================================
// Note creation
// ============================================================================

#[test]
fn test_new_creates_note_and_refreshes() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), "0");

    ebbnote()
        .args(["--config", config.to_str().unwrap(), "new", "Math", "Limits"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    let note = dir.path().join("answers/Math/Limits.md");
    assert_eq!(fs::read_to_string(note).unwrap(), "## Limits\n");
    assert!(read_export(dir.path(), "export.md").contains("- [Limits](Math/Limits.md)"));
}

#[test]
fn test_new_existing_note_is_noop() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), "0");
    let note = dir.path().join("answers/Math/A.md");
    fs::create_dir_all(note.parent().unwrap()).unwrap();
    fs::write(&note, "## A\nworked answer\n").unwrap();

    ebbnote()
        .args(["--config", config.to_str().unwrap(), "new", "Math", "A"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    assert_eq!(fs::read_to_string(&note).unwrap(), "## A\nworked answer\n");
}

#[test]
fn test_new_reserved_characters_exit_code_2() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), "0");

    ebbnote()
        .args(["--config", config.to_str().unwrap(), "new", "Math", "why?"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("reserved characters"));

    assert!(!dir.path().join("answers/Math").exists());
}

#[test]
fn test_new_json_output() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), "0");

    let output = ebbnote()
        .args([
            "--config",
            config.to_str().unwrap(),
            "--format",
            "json",
            "new",
            "Art",
            "Colour",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["created"], true);
    assert_eq!(json["subject"], "Art");
}

#[test]
fn test_push_without_git_is_usage_error() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), "0");

    ebbnote()
        .args(["--config", config.to_str().unwrap(), "push"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("git is not enabled"));
}

// ============================================================================
// HTML conversion
// ============================================================================

#[test]
fn test_html_converts_notes() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), "0");
    write_note(dir.path(), "Math", "A", 0);
    let out = dir.path().join("site");

    ebbnote()
        .args([
            "--config",
            config.to_str().unwrap(),
            "html",
            "--out",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Converted 1 notes"));

    let html = fs::read_to_string(out.join("Math/A.html")).unwrap();
    assert!(html.contains("<h2>A</h2>"));
}

// ============================================================================
// Interactive shell with piped input
// ============================================================================

#[test]
fn test_shell_creates_note_from_piped_input() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), "0");

    ebbnote()
        .args(["--config", config.to_str().unwrap()])
        .write_stdin("1\nMath A\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("notes due for review"))
        .stdout(predicate::str::contains(">> Bye"));

    assert!(dir.path().join("answers/Math/A.md").exists());
    assert!(read_export(dir.path(), "export.md").contains("- [A](Math/A.md)"));
}

#[test]
fn test_shell_unknown_option() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), "0");

    ebbnote()
        .args(["--config", config.to_str().unwrap(), "shell"])
        .write_stdin("9\n0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not an available option"));
}

#[test]
fn test_shell_ends_on_eof() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), "0");

    ebbnote()
        .args(["--config", config.to_str().unwrap()])
        .write_stdin("")
        .assert()
        .success();

    assert!(dir.path().join("answers/export.md").exists());
}
