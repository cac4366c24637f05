//! Error scenario integration tests

use std::process::Command;

use tempfile::TempDir;

fn rosbag_panel_bin(config_home: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_rosbag-panel"));
    cmd.env("HOME", config_home.path())
        .env("XDG_CONFIG_HOME", config_home.path())
        .env("NO_COLOR", "1");
    cmd
}

fn assert_fails_with(args: &[&str], expected: &[&str]) {
    let home = TempDir::new().unwrap();
    let output = rosbag_panel_bin(&home)
        .args(args)
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        expected.iter().any(|e| stderr.contains(e)),
        "Expected one of {:?}, got: {}",
        expected,
        stderr
    );
}

#[test]
fn config_get_unknown_key() {
    assert_fails_with(&["config", "get", "unknown_key"], &["Unknown", "Valid"]);
}

#[test]
fn config_set_unknown_key() {
    assert_fails_with(&["config", "set", "unknown_key", "value"], &["Unknown", "Valid"]);
}

#[test]
fn config_set_zero_render_interval() {
    assert_fails_with(
        &["config", "set", "render_interval_ms", "0"],
        &["positive integer"],
    );
}

#[test]
fn config_set_invalid_timestamp_format() {
    assert_fails_with(
        &["config", "set", "timestamp_format", "%Q"],
        &["timestamp", "format"],
    );
}

#[test]
fn config_set_relative_topic() {
    assert_fails_with(&["config", "set", "topics", "imu"], &["start with '/'"]);
}

#[test]
fn invalid_render_interval_flag() {
    assert_fails_with(&["--render-interval", "soon"], &["invalid value", "error"]);
}
