//! Error scenario integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn euro_listener_bin(scratch: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("euro-listener").expect("binary builds");
    cmd.env("XDG_CONFIG_HOME", scratch.path().join("config"))
        .env("XDG_RUNTIME_DIR", scratch.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn invalid_tick_interval_is_usage_error() {
    let scratch = TempDir::new().unwrap();
    euro_listener_bin(&scratch)
        .args(["--tick-interval", "often"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid duration"));
}

#[test]
fn too_short_tick_interval_is_usage_error() {
    let scratch = TempDir::new().unwrap();
    euro_listener_bin(&scratch)
        .args(["--tick-interval", "20ms"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("at least 100ms"));
}

#[test]
fn invalid_cycle_length_is_usage_error() {
    let scratch = TempDir::new().unwrap();
    euro_listener_bin(&scratch)
        .args(["--cycle-length", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid cycle length"));
}

#[test]
fn unknown_permission_gate_rejected_by_parser() {
    let scratch = TempDir::new().unwrap();
    euro_listener_bin(&scratch)
        .args(["--permission-gate", "lenient"])
        .assert()
        .code(2);
}

#[test]
fn ctl_without_listener_fails() {
    let scratch = TempDir::new().unwrap();
    euro_listener_bin(&scratch)
        .args(["ctl", "status"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No listener running"));
}

#[test]
fn config_get_unknown_key() {
    let scratch = TempDir::new().unwrap();
    euro_listener_bin(&scratch)
        .args(["config", "get", "api_key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown key"));
}

#[test]
fn config_set_unknown_key() {
    let scratch = TempDir::new().unwrap();
    euro_listener_bin(&scratch)
        .args(["config", "set", "unknown_key", "value"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Valid keys"));
}

#[test]
fn config_set_invalid_value() {
    let scratch = TempDir::new().unwrap();
    euro_listener_bin(&scratch)
        .args(["config", "set", "notify", "sometimes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("true"));
}

#[test]
fn config_init_twice_fails() {
    let scratch = TempDir::new().unwrap();
    euro_listener_bin(&scratch)
        .args(["config", "init"])
        .assert()
        .success();
    euro_listener_bin(&scratch)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
