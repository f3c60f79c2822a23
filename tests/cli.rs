use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper: get a Command for the tabhost binary.
fn tabhost() -> Command {
    let mut cmd = Command::cargo_bin("tabhost").expect("tabhost binary not found");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Helper: write a config.toml into a TempDir.
fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, content).unwrap();
    path
}

// ============================================================================
// Snapshot rendering
// ============================================================================
#[test]
fn test_snapshot_renders_tabs_and_active_page() {
    tabhost()
        .args(["snapshot", "--width", "60", "--height", "10"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[Counter]| Key Log | About "))
        .stdout(predicate::str::contains("Count: 0"))
        .stdout(predicate::str::contains("ctrl+left / ctrl+right switch tabs"));
}

#[test]
fn test_snapshot_switches_page() {
    tabhost()
        .args(["snapshot", "--width", "60", "--height", "12", "--page", "about"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[About]"))
        .stdout(predicate::str::contains("Terminal  60x12"))
        .stdout(predicate::str::contains("Content   60x10"));
}

#[test]
fn test_snapshot_steps_wrap_around() {
    tabhost()
        .args(["snapshot", "--width", "60", "--height", "6", "--steps", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[Key Log]"));
}

#[test]
fn test_snapshot_unknown_page_fails_with_hint() {
    tabhost()
        .args(["snapshot", "--page", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Page not found: 'nope'"))
        .stderr(predicate::str::contains("hint:"));
}

#[test]
fn test_snapshot_zero_size_is_empty() {
    tabhost()
        .args(["snapshot", "--width", "0", "--height", "0"])
        .assert()
        .success()
        .stdout(predicate::eq("\n"));
}

// ============================================================================
// Key bindings
// ============================================================================
#[test]
fn test_keys_defaults() {
    tabhost()
        .arg("keys")
        .assert()
        .success()
        .stdout(predicate::str::contains("next      ctrl+right"))
        .stdout(predicate::str::contains("previous  ctrl+left"))
        .stdout(predicate::str::contains("quit      ctrl+c"))
        .stdout(predicate::str::contains("nav keys  consumed"));
}

#[test]
fn test_keys_from_config_with_cli_override() {
    let dir = TempDir::new().unwrap();
    let config = write_config(
        &dir,
        "[keys]\nnext = \"tab\"\nprevious = \"backtab\"\nquit = \"none\"\n",
    );

    tabhost()
        .args(["keys", "--config", config.to_str().unwrap(), "--next-key", "f2", "--forward-nav-keys"])
        .assert()
        .success()
        .stdout(predicate::str::contains("next      f2"))
        .stdout(predicate::str::contains("previous  backtab"))
        .stdout(predicate::str::contains("quit      none"))
        .stdout(predicate::str::contains("nav keys  forwarded to page"));
}

#[test]
fn test_invalid_key_binding() {
    tabhost()
        .args(["keys", "--prev-key", "ctrl+"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid key binding 'ctrl+'"))
        .stderr(predicate::str::contains("hint:"));
}

#[test]
fn test_missing_config_file() {
    let dir = TempDir::new().unwrap();
    tabhost()
        .args(["keys", "--config", dir.path().join("missing.toml").to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_malformed_config_file() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "[keys]\nnext = \n");
    tabhost()
        .args(["keys", "--config", config.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

// ============================================================================
// Misc
// ============================================================================
#[test]
fn test_completions_generate() {
    tabhost()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tabhost"));
}

#[test]
fn test_help_lists_subcommands() {
    tabhost()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("snapshot"))
        .stdout(predicate::str::contains("keys"));
}
