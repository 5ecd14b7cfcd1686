//! Integration tests for the sysfs GPIO driver

use std::fs;

use pi_led::{Level, PinDriver, PinId, SysfsGpio};

#[test]
fn configure_sets_direction_of_exported_pin() {
    let root = tempfile::tempdir().unwrap();
    fs::create_dir(root.path().join("gpio17")).unwrap();

    let mut gpio = SysfsGpio::with_root(root.path());
    gpio.configure_as_output(PinId(17)).unwrap();

    let direction = fs::read_to_string(root.path().join("gpio17/direction")).unwrap();
    assert_eq!(direction, "out");
    assert!(!root.path().join("export").exists());
}

#[test]
fn set_writes_value_file() {
    let root = tempfile::tempdir().unwrap();
    fs::create_dir(root.path().join("gpio4")).unwrap();
    let mut gpio = SysfsGpio::with_root(root.path());

    gpio.set(PinId(4), Level::High).unwrap();
    assert_eq!(fs::read_to_string(root.path().join("gpio4/value")).unwrap(), "1");

    gpio.set(PinId(4), Level::Low).unwrap();
    assert_eq!(fs::read_to_string(root.path().join("gpio4/value")).unwrap(), "0");
}

#[test]
fn unexported_pin_is_exported_first() {
    let root = tempfile::tempdir().unwrap();
    let mut gpio = SysfsGpio::with_root(root.path());

    // Nothing creates gpio9/ here, so setting the direction eventually fails.
    let err = gpio.configure_as_output(PinId(9)).unwrap_err();
    assert_eq!(err.pin, PinId(9));
    assert_eq!(fs::read_to_string(root.path().join("export")).unwrap(), "9");
}

#[test]
fn write_to_missing_pin_reports_the_pin() {
    let root = tempfile::tempdir().unwrap();
    let mut gpio = SysfsGpio::with_root(root.path());

    let err = gpio.set(PinId(22), Level::High).unwrap_err();
    assert_eq!(err.pin, PinId(22));
    assert!(err.to_string().starts_with("pin 22:"));
}
