//! Integration tests for the xwork command surface
//!
//! These tests verify argument parsing and the failure paths that need no
//! work server.

#![allow(clippy::expect_used)]

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn xwork() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("xwork"));
    cmd.env("NO_COLOR", "1")
        .env_remove("XWORK_CHAIN")
        .env_remove("XWORK_JWTOKEN")
        .env_remove("RUST_LOG");
    cmd
}

/// `xwork` running against `dir` as its project directory.
fn xwork_in(dir: &Path) -> Command {
    let mut cmd = xwork();
    cmd.env("XWORK_PROJECT_DIR", dir).current_dir(dir);
    cmd
}

const CHAINS: &str = "\
chains:
  development:
    server: http://127.0.0.1:9
    network_id: 1337
";

const PROJECT: &str = "\
name: factorial
data:
  type: TEXT
";

fn project_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("chains.yaml"), CHAINS).expect("chains.yaml");
    std::fs::write(dir.path().join("xwork.yaml"), PROJECT).expect("xwork.yaml");
    dir
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    xwork().assert().code(2).stderr(predicate::str::contains(
        "Deploy apps, upload data, and run work on an XtremWeb work server",
    ));
}

#[test]
fn test_cli_help_lists_every_command() {
    let assert = xwork()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    for command in ["deploy", "upload", "submit", "result", "version", "api"] {
        assert!(stdout.contains(command), "help is missing `{command}`");
    }
}

#[test]
fn test_cli_version_flag_shows_client_version() {
    xwork()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("xwork"));
}

// --- Argument validation ---

#[test]
fn test_result_requires_work_uid() {
    xwork().arg("result").assert().code(2);
}

#[test]
fn test_result_timeout_requires_watch() {
    xwork()
        .args(["result", "w-1", "--timeout", "10"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--watch"));
}

#[test]
fn test_upload_requires_path() {
    xwork().arg("upload").assert().code(2);
}

// --- Local failure paths ---

#[test]
fn test_deploy_without_project_file_names_it() {
    let dir = tempfile::tempdir().expect("tempdir");

    xwork_in(dir.path())
        .arg("deploy")
        .assert()
        .failure()
        .stderr(predicate::str::contains("xwork.yaml"));
}

#[test]
fn test_json_errors_are_reported_on_stdout() {
    let dir = tempfile::tempdir().expect("tempdir");

    xwork_in(dir.path())
        .args(["deploy", "--json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(r#""error": true"#));
}

#[test]
fn test_unknown_chain_lists_known_chains() {
    let dir = project_dir();

    xwork_in(dir.path())
        .env("XWORK_JWTOKEN", "jwt")
        .args(["version", "--chain", "mainnet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown chain: mainnet"))
        .stderr(predicate::str::contains("development"));
}

#[test]
fn test_unknown_chain_json_carries_error_code() {
    let dir = project_dir();

    xwork_in(dir.path())
        .env("XWORK_JWTOKEN", "jwt")
        .args(["--json", "--chain", "mainnet", "version"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(r#""code": "UNKNOWN_CHAIN""#));
}

#[test]
fn test_submit_with_blank_app_uid_fails_without_network() {
    let dir = project_dir();

    xwork_in(dir.path())
        .env("XWORK_JWTOKEN", "jwt")
        .args(["submit", " "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("appUID undefined"));
}
