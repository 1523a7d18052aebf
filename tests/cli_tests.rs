//! Binary-Level CLI Tests
//!
//! Drives the compiled `cosmo` binary and checks exit codes, stderr
//! messages, and `--json` envelopes for configuration and authentication
//! failures. None of these tests reach a network: they fail before any
//! client is created.

use assert_cmd::Command;
use predicates::prelude::*;

use cosmo::config::{
    CONNECTION_STRING_ENV, DATABASE_NAME_ENV, ENDPOINT_ENV, KEY_ENV,
};

/// A `cosmo` command with all connection environment cleared
fn cosmo_cmd() -> Command {
    let mut cmd = Command::cargo_bin("cosmo").expect("binary builds");
    for var in [CONNECTION_STRING_ENV, ENDPOINT_ENV, KEY_ENV, DATABASE_NAME_ENV] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_help_lists_command_groups() {
    cosmo_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("containers"))
        .stdout(predicate::str::contains("items"));
}

#[test]
fn test_version_flag() {
    cosmo_cmd().arg("--version").assert().success().stdout(predicate::str::contains("cosmo"));
}

#[test]
fn test_no_subcommand_shows_help() {
    cosmo_cmd().assert().success().stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_missing_database_name_is_actionable() {
    cosmo_cmd()
        .args(["containers", "list"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(DATABASE_NAME_ENV));
}

#[test]
fn test_missing_connection_string_is_auth_failure() {
    cosmo_cmd()
        .args(["containers", "list"])
        .env(DATABASE_NAME_ENV, "orders")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Authentication failure"))
        .stderr(predicate::str::contains("not provided"));
}

#[test]
fn test_json_mode_emits_error_envelope_on_stdout() {
    cosmo_cmd()
        .args(["--json", "containers", "list"])
        .env(DATABASE_NAME_ENV, "orders")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains(r#""ok":false"#))
        .stdout(predicate::str::contains(r#""code":"AUTH_FAILURE""#));
}

#[test]
fn test_ambiguous_auth_configuration_is_rejected() {
    cosmo_cmd()
        .args(["containers", "list"])
        .env(DATABASE_NAME_ENV, "orders")
        .env(CONNECTION_STRING_ENV, "AccountEndpoint=https://localhost:8081/;AccountKey=a==")
        .env(ENDPOINT_ENV, "https://localhost:8081/")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Ambiguous"));
}

#[test]
fn test_delete_without_confirmation_aborts() {
    // No TTY: the confirmation prompt cannot be answered, which counts as a
    // decline; the command exits before any configuration is needed
    cosmo_cmd()
        .args(["items", "delete", "products", "sku-1", "--partition-key", "pk"])
        .write_stdin("")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Aborted"));
}
