//! Binary-level tests for the `chatgate` CLI.

mod support;

use assert_cmd::Command;
use predicates::prelude::*;

use support::config::{minimal_toml, write_config};

fn chatgate() -> Command {
    Command::cargo_bin("chatgate").expect("binary built")
}

#[test]
fn check_config_succeeds_with_credential_present() {
    let uploads = tempfile::tempdir().unwrap();
    let (_dir, path) = write_config(&minimal_toml("CHATGATE_CLI_TOKEN_OK", uploads.path()));

    chatgate()
        .env("CHATGATE_CLI_TOKEN_OK", "secret")
        .args(["check", "config", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration OK"))
        .stdout(predicate::str::contains("https://inference.example.com/analyze/image"));
}

#[test]
fn check_config_fails_without_credential() {
    let uploads = tempfile::tempdir().unwrap();
    let (_dir, path) = write_config(&minimal_toml("CHATGATE_CLI_TOKEN_MISSING", uploads.path()));

    chatgate()
        .env_remove("CHATGATE_CLI_TOKEN_MISSING")
        .args(["check", "config", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("CHATGATE_CLI_TOKEN_MISSING"));
}

#[test]
fn check_config_reports_invalid_values() {
    let (_dir, path) = write_config(concat!(
        "[backend]\n",
        "base_url = \"ftp://inference.example.com\"\n",
    ));

    chatgate()
        .args(["check", "config", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("backend.base_url"));
}

#[test]
fn check_config_fails_for_missing_file() {
    let dir = tempfile::tempdir().unwrap();

    chatgate()
        .args(["check", "config", "--config"])
        .arg(dir.path().join("nope.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config file"));
}

#[test]
fn serve_fails_fast_on_bad_config() {
    let (_dir, path) = write_config("");

    chatgate()
        .args(["serve", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("backend.base_url"));
}

#[test]
fn version_flag_prints_version() {
    chatgate()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
