// SPDX-License-Identifier: Apache-2.0

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn rut() -> Command {
    let mut cmd = Command::cargo_bin("rut").expect("rut binary");
    cmd.env("RUT_CONFIG", "/nonexistent/rut/config.toml")
        .env_remove("RUT_LOG_LEVEL")
        .env_remove("RUT_LOG_JSON");
    cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("json stdout")
}

#[test]
fn clean_and_format_print_canonical_forms() {
    rut()
        .args(["clean", " 12.345.678-k "])
        .assert()
        .success()
        .stdout("12345678K\n");
    rut()
        .args(["format", "123456789"])
        .assert()
        .success()
        .stdout("12.345.678-9\n");
}

#[test]
fn check_digit_known_vector() {
    rut()
        .args(["check-digit", "12345678"])
        .assert()
        .success()
        .stdout("5\n");
}

#[test]
fn check_digit_rejects_separators_as_usage_error() {
    let output = rut()
        .args(["--json", "check-digit", "12.345.678"])
        .output()
        .expect("run check-digit");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).expect("utf8 stderr");
    assert!(stderr.contains("invalid_argument"));
}

#[test]
fn validate_exit_code_reflects_every_input() {
    rut()
        .args(["validate", "12.345.678-5", "1.000.005-k"])
        .assert()
        .success()
        .stdout(predicate::str::contains("12.345.678-5\tvalid"));

    rut()
        .args(["--quiet", "validate", "12.345.678-5", "12.345.678-9"])
        .assert()
        .code(3)
        .stdout(predicate::str::contains("12.345.678-9\tinvalid"));
}

#[test]
fn validate_json_reports_reasons() {
    let output = rut()
        .args(["--json", "--quiet", "validate", "1234", "12.345.678-9"])
        .output()
        .expect("run validate");
    assert_eq!(output.status.code(), Some(3));
    let payload = stdout_json(&output);
    assert_eq!(payload["valid"], false);
    assert_eq!(payload["results"][0]["error"]["code"], "invalid_rut");
    assert_eq!(payload["results"][1]["error"]["code"], "check_digit_mismatch");
    assert_eq!(payload["results"][1]["error"]["details"]["expected"], "5");
}

#[test]
fn validate_reads_stdin_lines() {
    rut()
        .args(["validate", "--stdin"])
        .write_stdin("12.345.678-5\n\n7654321-6\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("7654321-6\tvalid\t7.654.321-6"));
}

#[test]
fn validate_without_inputs_is_a_usage_error() {
    rut().arg("validate").assert().code(2);
}

#[test]
fn compare_ignores_formatting() {
    rut()
        .args(["compare", "12.345.678-9", "12345678-9"])
        .assert()
        .success()
        .stdout("equal\n");
    rut()
        .args(["compare", "12.345.678-9", "12.345.678-0"])
        .assert()
        .code(3)
        .stdout("different\n");
}

#[test]
fn parts_and_complete() {
    let output = rut()
        .args(["--json", "parts", "12.345.678-k"])
        .output()
        .expect("run parts");
    let payload = stdout_json(&output);
    assert_eq!(payload["body"], "12345678");
    assert_eq!(payload["dv"], "K");

    rut()
        .args(["complete", "1.000.005"])
        .assert()
        .success()
        .stdout("1.000.005-K\n");
    rut().args(["complete", "12K"]).assert().code(2);
}

#[test]
fn search_filters_stored_ruts() {
    rut()
        .args(["search", "654", "7.654.321-6", "12.345.678-5"])
        .assert()
        .success()
        .stdout("7.654.321-6\n");
}

#[test]
fn config_file_turns_on_json_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "json = true\nlog_level = \"error\"\n").expect("write config");

    let output = rut()
        .env("RUT_CONFIG", &path)
        .args(["format", "123456785"])
        .output()
        .expect("run format");
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["formatted"], "12.345.678-5");
}

#[test]
fn malformed_config_is_an_internal_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "unknown_key = 1\n").expect("write config");

    rut()
        .env("RUT_CONFIG", &path)
        .args(["format", "123456785"])
        .assert()
        .code(10)
        .stderr(predicate::str::contains("invalid config"));
}

#[test]
fn print_config_paths_reports_resolved_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "").expect("write config");

    let output = rut()
        .env("RUT_CONFIG", &path)
        .args(["--json", "--print-config-paths"])
        .output()
        .expect("run print-config-paths");
    assert!(output.status.success());
    let payload = stdout_json(&output);
    assert_eq!(payload["exists"], true);
    assert_eq!(payload["config"], path.display().to_string());
}

#[test]
fn global_flags_after_inputs_are_still_flags() {
    let output = rut()
        .args(["validate", "12.345.678-5", "7654321-6", "--json", "--quiet"])
        .output()
        .expect("run validate");
    assert_eq!(output.status.code(), Some(0));
    let payload = stdout_json(&output);
    assert_eq!(payload["valid"], true);
    assert_eq!(payload["results"].as_array().map(Vec::len), Some(2));

    let output = rut()
        .args(["search", "654", "7.654.321-6", "--json"])
        .output()
        .expect("run search");
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["matches"][0], "7.654.321-6");
}

#[cfg(unix)]
#[test]
fn non_utf8_argument_is_a_usage_error() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let output = rut()
        .arg("validate")
        .arg(OsStr::from_bytes(b"\xff"))
        .output()
        .expect("run validate");
    assert_eq!(output.status.code(), Some(2));

    let output = rut()
        .arg("--json")
        .arg("format")
        .arg(OsStr::from_bytes(b"12\xff345"))
        .output()
        .expect("run format");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage_error"), "{stderr}");
}

#[test]
fn stdin_and_positional_inputs_conflict() {
    rut()
        .args(["validate", "--stdin", "12.345.678-5"])
        .write_stdin("7654321-6\n")
        .assert()
        .code(2);
}

#[test]
fn empty_stdin_is_reported_as_such() {
    rut()
        .args(["validate", "--stdin"])
        .write_stdin("\n  \n")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("standard input held no RUTs"));
}

#[test]
fn complete_refuses_bodies_that_would_not_validate() {
    rut()
        .args(["--json", "complete", "123456"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid_rut"));
}
