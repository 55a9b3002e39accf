use std::process::{Command, Output};

fn stp2stl(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_stp2stl"))
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_version() {
    let out = stp2stl(&["--version"]);
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.starts_with("stp2stl/0.1"));
}

#[test]
fn test_help() {
    let out = stp2stl(&["-h"]);
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("--deflection"));
    assert!(stdout.contains("--scale"));
}

#[test]
fn test_help_and_version_win_over_bad_arguments() {
    let out = stp2stl(&["--version", "--bogus"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8(out.stdout).unwrap().starts_with("stp2stl/"));

    let out = stp2stl(&["a.step", "--deflection", "nope", "--help"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8(out.stdout).unwrap().contains("--angle"));
}

#[test]
fn test_missing_positionals() {
    assert_eq!(stp2stl(&[]).status.code(), Some(2));
    assert_eq!(stp2stl(&["only.step"]).status.code(), Some(2));
}

#[test]
fn test_bad_flag_value() {
    let out = stp2stl(&["a.step", "b.stl", "--deflection", "nope"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn test_missing_input_reports_read_failure() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("missing.step");
    let output = dir.path().join("out.stl");
    let out = stp2stl(&[input.to_str().unwrap(), output.to_str().unwrap()]);

    assert_eq!(out.status.code(), Some(10));
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("Conversion failed (10): STEP read failed"));
    assert!(!output.exists());
}

#[cfg(feature = "occt")]
#[test]
fn test_converts_cube() {
    let input = concat!(env!("CARGO_MANIFEST_DIR"), "/../stp2stl/tests/fixtures/cube.step");
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("cube.stl");
    let out = stp2stl(&[input, output.to_str().unwrap(), "--ascii", "--scale", "2"]);

    assert_eq!(out.status.code(), Some(0), "{}", String::from_utf8_lossy(&out.stderr));
    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("solid"));
    assert!(text.contains("2.000000e1"));
}
