//! Integration tests for the `pi-led` binary's startup failures

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn pi_led(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pi-led"))
        .args(args)
        .arg("--dry-run")
        .stdin(Stdio::null())
        .output()
        .unwrap()
}

fn assert_failed(output: &Output) {
    assert!(!output.status.success(), "exited with {}", output.status);
    assert!(!output.stderr.is_empty(), "nothing written to stderr");
}

#[test]
fn missing_config_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.ini");

    let output = pi_led(&["-c", path.to_str().unwrap()]);
    assert_failed(&output);
    assert!(String::from_utf8_lossy(&output.stderr).contains("absent.ini"));
}

#[test]
fn duplicate_pin_in_config_fails() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"[One]\nr = 5\n\n[Two]\nb = 5\n").unwrap();

    let flag = format!("--config-file={}", file.path().display());
    let output = pi_led(&[&flag]);
    assert_failed(&output);
}

#[test]
fn unknown_option_fails() {
    let output = pi_led(&["--bogus"]);
    assert_failed(&output);
}
