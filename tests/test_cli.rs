//! Basic binary invocation tests (assert_cmd).

mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

fn gphotos_cmd() -> Command {
    let mut cmd = cargo_bin_cmd!("gphotos");
    cmd.env_remove("GPHOTOS_CLIENT_ID")
        .env_remove("GPHOTOS_CLIENT_SECRET");
    cmd
}

#[test]
fn test_cli_version() {
    let mut cmd = gphotos_cmd();
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("gphotos"));
}

#[test]
fn test_cli_help() {
    let mut cmd = gphotos_cmd();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Google Photos"))
        .stdout(predicate::str::contains("--config_path"));
}

#[test]
fn test_cli_requires_filename() {
    let (_tmp, dir) = common::temp_config_dir();
    let mut cmd = gphotos_cmd();
    cmd.arg("-c").arg(&dir);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("FILENAME"));
}

#[test]
fn test_cli_rejects_missing_config_dir() {
    let mut cmd = gphotos_cmd();
    cmd.args(["sunset.jpg", "--config_path", "/definitely/not/here/gphotos-xyz"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_cli_without_client_writes_template_and_log() {
    let (_tmp, dir) = common::temp_config_dir();
    let mut cmd = gphotos_cmd();
    cmd.arg("sunset.jpg").arg("-c").arg(&dir);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("client_id/client_secret missing"));

    assert!(dir.join("config.ini").exists());

    let logs: Vec<_> = std::fs::read_dir(dir.join("logs"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(logs.len(), 1);
    assert!(logs[0].starts_with("photos_"));
    assert!(logs[0].ends_with(".log"));

    let content = std::fs::read_to_string(dir.join("logs").join(&logs[0])).unwrap();
    assert!(content.contains("Using config file:"));
}

#[test]
fn test_cli_accepts_dashed_alias() {
    let (_tmp, dir) = common::temp_config_dir();
    let mut cmd = gphotos_cmd();
    cmd.arg("sunset.jpg").arg("--config-path").arg(&dir);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("client_id/client_secret missing"));
}
