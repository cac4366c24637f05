//! Interactive session integration tests
//!
//! Drive the panel through piped stdin against the simulated recorder.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn session(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("rosbag-panel").unwrap();
    cmd.env("HOME", config_home.path())
        .env("XDG_CONFIG_HOME", config_home.path())
        .env("NO_COLOR", "1")
        .env("ROSBAG_PANEL_LOG", "warn")
        .args(["--render-interval", "20"]);
    cmd
}

#[test]
fn record_and_save_a_bag() {
    let home = TempDir::new().unwrap();
    session(&home)
        .write_stdin("name field_run_42\ndir /tmp/bags\ncheck /tf\nstart\nstop\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Stop Recording"))
        .stdout(predicate::str::contains("Saved Recordings"))
        .stdout(predicate::str::contains("field_run_42"));
}

#[test]
fn end_of_input_ends_session() {
    let home = TempDir::new().unwrap();
    session(&home)
        .write_stdin("show\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("● Ready"))
        .stdout(predicate::str::contains("[ ] /imu/data"));
}

#[test]
fn configured_parameters_fill_the_form() {
    let home = TempDir::new().unwrap();
    session(&home)
        .args(["-b", "seeded", "-o", "/data", "-t", "/odom"])
        .write_stdin("show\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("seeded"))
        .stdout(predicate::str::contains("/data"))
        .stdout(predicate::str::contains("[x] /odom"));
}

#[test]
fn start_with_incomplete_form_is_refused() {
    let home = TempDir::new().unwrap();
    session(&home)
        .write_stdin("name only_name\nstart\nquit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("output directory is empty"))
        .stdout(predicate::str::contains("Saved Recordings").not());
}

#[test]
fn unknown_command_is_reported() {
    let home = TempDir::new().unwrap();
    session(&home)
        .write_stdin("launch\nquit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Unknown command 'launch'"));
}

#[test]
fn help_lists_commands() {
    let home = TempDir::new().unwrap();
    session(&home)
        .write_stdin("help\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("check <topic>"))
        .stdout(predicate::str::contains("record"));
}
