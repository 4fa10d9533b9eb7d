//! CLI tests focused on exit codes, stdout payload and diagnostics.
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn geotag_command() -> Command {
    let mut cmd = Command::cargo_bin("dji-geotag").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

/// A well-formed file prints exactly one JSON line and nothing else.
#[test]
fn prints_json_for_well_formed_file() {
    let td = TempDir::new().unwrap();
    let path = td.path().join("DJI_0001.SRT");
    fs::write(
        &path,
        "1\n00:00:00,000 --> 00:00:00,033\n<font size=\"28\">FrameCnt: 1, DiffTime: 33ms\n\
         [latitude: 12.34] [longitude: 56.78] [rel_alt: 1.0 abs_alt: 100.5] </font>\n",
    )
    .unwrap();

    let mut cmd = geotag_command();
    cmd.arg(&path);
    cmd.assert()
        .success()
        .stdout("{\"latitude\":12.34,\"longitude\":56.78,\"altitude\":100.5}\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn fixture_file_succeeds() {
    let mut cmd = geotag_command();
    cmd.arg("tests/fixtures/phantom4.srt");
    cmd.assert()
        .success()
        .stdout("{\"latitude\":-20.2533,\"longitude\":149.0251,\"altitude\":16.0}\n");
}

/// No argument is a usage error, exit 1.
#[test]
fn no_arguments_is_usage_error() {
    let mut cmd = geotag_command();
    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Usage: dji-geotag <srt_file_path>"));
}

/// Two arguments are a usage error even when both files exist.
#[test]
fn two_arguments_is_usage_error() {
    let mut cmd = geotag_command();
    cmd.args(["tests/fixtures/mini2.SRT", "tests/fixtures/mavic_pro.srt"]);
    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn missing_file_fails_without_json() {
    let td = TempDir::new().unwrap();
    let mut cmd = geotag_command();
    cmd.arg(td.path().join("nope.srt"));
    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Failed to read SRT file"));
}

#[test]
fn file_without_cues_reports_no_entries() {
    let mut cmd = geotag_command();
    cmd.arg("tests/fixtures/no_cues.srt");
    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No metadata entries found"));
}

#[test]
fn missing_fields_lists_available_keys() {
    let mut cmd = geotag_command();
    cmd.arg("tests/fixtures/missing_altitude.srt");
    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(
            predicate::str::contains(
                "Missing required fields (latitude, longitude, abs_alt) in first SRT entry",
            )
            .and(predicate::str::contains(
                "Available fields: index, timecode, srtcnt",
            )),
        );
}

/// A lone flag-like argument is taken as the path, like any other.
#[test]
fn help_flag_is_treated_as_path() {
    let mut cmd = geotag_command();
    cmd.arg("--help");
    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Failed to read SRT file at --help"));
}

#[test]
fn hyphen_prefixed_path_is_read() {
    let td = TempDir::new().unwrap();
    fs::copy("tests/fixtures/mini2.SRT", td.path().join("-flight.SRT")).unwrap();

    let mut cmd = geotag_command();
    cmd.current_dir(td.path()).arg("-flight.SRT");
    cmd.assert()
        .success()
        .stdout("{\"latitude\":45.123456,\"longitude\":7.654321,\"altitude\":257.627}\n");
}
