//! CLI integration tests

use std::process::Command;

use tempfile::TempDir;

fn rosbag_panel_bin(config_home: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_rosbag-panel"));
    cmd.env("HOME", config_home.path())
        .env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("ROSBAG_PANEL_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn help_output() {
    let home = TempDir::new().unwrap();
    let output = rosbag_panel_bin(&home)
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Recording control panel"));
    assert!(stdout.contains("--bag-name"));
    assert!(stdout.contains("--output-dir"));
    assert!(stdout.contains("--topic"));
    assert!(stdout.contains("--render-interval"));
    assert!(stdout.contains("--log-level"));
}

#[test]
fn version_output() {
    let home = TempDir::new().unwrap();
    let output = rosbag_panel_bin(&home)
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("rosbag-panel"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn config_path_command() {
    let home = TempDir::new().unwrap();
    let output = rosbag_panel_bin(&home)
        .args(["config", "path"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("rosbag-panel"));
    assert!(stdout.contains("config.toml"));
}

#[test]
fn config_help() {
    let home = TempDir::new().unwrap();
    let output = rosbag_panel_bin(&home)
        .args(["config", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("init"));
    assert!(stdout.contains("set"));
    assert!(stdout.contains("get"));
    assert!(stdout.contains("list"));
    assert!(stdout.contains("path"));
}

#[test]
fn config_set_then_get() {
    let home = TempDir::new().unwrap();
    let output = rosbag_panel_bin(&home)
        .args(["config", "set", "topics", "/imu/data, /odom"])
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());

    let output = rosbag_panel_bin(&home)
        .args(["config", "get", "topics"])
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "/imu/data,/odom");
}

#[test]
fn config_list_shows_all_keys() {
    let home = TempDir::new().unwrap();
    let output = rosbag_panel_bin(&home)
        .args(["config", "list"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for key in ["bag_name", "output_directory", "render_interval_ms", "demo.bytes_per_second"] {
        assert!(stdout.contains(key), "missing {} in: {}", key, stdout);
    }
}

#[test]
fn config_init_twice_fails() {
    let home = TempDir::new().unwrap();
    let first = rosbag_panel_bin(&home)
        .args(["config", "init"])
        .output()
        .expect("Failed to execute command");
    assert!(first.status.success());

    let second = rosbag_panel_bin(&home)
        .args(["config", "init"])
        .output()
        .expect("Failed to execute command");
    assert!(!second.status.success());
}
