//! CLI integration tests
//!
//! Runs the built binary and checks output streams and exit codes.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

fn deckhand_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_deckhand"))
}

fn deckhand(args: &[&str]) -> Output {
    Command::new(deckhand_bin())
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("DECKHAND_MACHINE_READABLE")
        .env_remove("DECKHAND_DEFAULT_INFRA")
        .env_remove("DECKHAND_SCAN_DEPTH")
        .env("DECKHAND_LOG_LEVEL", "error")
        .output()
        .expect("Failed to execute deckhand")
}

#[test]
fn test_cli_version() {
    let output = deckhand(&["--version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        format!("deckhand v{}", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn test_cli_no_command_shows_help() {
    let output = deckhand(&[]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage: deckhand"));
    for name in ["compile", "build", "deploy", "dev", "infra", "status", "version"] {
        assert!(stdout.contains(name), "missing {} in help", name);
    }
    assert!(!stdout.contains("plugin-builtin"));
}

#[test]
fn test_cli_unknown_command() {
    let output = deckhand(&["launch"]);

    assert_eq!(output.status.code(), Some(127));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No such command: launch"));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Available commands are:"));
}

#[test]
fn test_cli_status_on_project() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("Gemfile"), "source 'https://rubygems.org'\n").unwrap();

    let output = deckhand(&["status", dir.path().to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("App type: ruby"));
}

#[test]
fn test_cli_build_unknown_project_fails() {
    let dir = TempDir::new().unwrap();

    let output = deckhand(&["build", dir.path().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--type"));
}

#[test]
fn test_cli_plugin_inventory_json() {
    let output = deckhand(&["plugin-builtin", "--format", "json"]);

    assert!(output.status.success());
    let inventory: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = inventory.as_array().unwrap();
    assert_eq!(entries.len(), 9);
    let binary = PathBuf::from(entries[0]["path"].as_str().unwrap());
    assert_eq!(binary.file_name(), deckhand_bin().file_name());
}

#[test]
fn test_cli_machine_readable_prefixes() {
    let output = Command::new(deckhand_bin())
        .args(["version"])
        .env("DECKHAND_MACHINE_READABLE", "true")
        .env("DECKHAND_LOG_LEVEL", "error")
        .output()
        .expect("Failed to execute deckhand");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("o:deckhand v"));
}

#[test]
fn test_cli_invalid_configuration() {
    let output = Command::new(deckhand_bin())
        .args(["version"])
        .env("DECKHAND_SCAN_DEPTH", "0")
        .env("DECKHAND_LOG_LEVEL", "error")
        .output()
        .expect("Failed to execute deckhand");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid configuration"));
}
