#![cfg(all(unix, feature = "cli"))]

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn cborprims(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cborprims"))
        .arg("--log-level")
        .arg("error")
        .args(args)
        .output()
        .expect("cborprims should run")
}

fn with_stdin(args: &[&str], input: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_cborprims"))
        .arg("--log-level")
        .arg("error")
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("cborprims should start");

    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(input)
        .expect("stdin should accept input");
    child.wait_with_output().expect("cborprims should exit")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn unique_temp_file(tag: &str) -> PathBuf {
    PathBuf::from(format!(
        "/tmp/cborprims-{tag}-{}-{}.cbor",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ))
}

#[test]
fn diag_pretty_prints_indefinite_array() {
    let output = cborprims(&["--format", "pretty", "diag", "9f0102ff"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "[1, 2]\n");
}

#[test]
fn diag_json_lists_every_item() {
    let output = cborprims(&["--format", "json", "diag", "c06a323031332d30332d3231 f6"]);

    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_str(stdout(&output).trim()).expect("diag output should be JSON");
    assert_eq!(json["size"], 13);
    assert_eq!(json["items"][0]["diagnostic"], "0(\"2013-03-21\")");
    assert_eq!(json["items"][0]["kind"], "tagged");
    assert_eq!(json["items"][1]["diagnostic"], "null");
    assert!(json["schema_id"]
        .as_str()
        .is_some_and(|id| id.ends_with("diag.schema.json")));
}

#[test]
fn diag_reads_stdin() {
    let output = with_stdin(
        &["--format", "pretty", "diag"],
        &[0x7F, 0x62, b'a', b'b', 0x62, b'c', b'd', 0xFF],
    );

    assert!(output.status.success());
    assert_eq!(stdout(&output), "\"abcd\"\n");
}

#[test]
fn diag_reads_file() {
    let path = unique_temp_file("diag");
    std::fs::write(&path, [0xFA, 0x7F, 0xC0, 0x00, 0x00]).expect("temp file should be writable");

    let path_arg = path.to_str().expect("temp path should be UTF-8");
    let output = cborprims(&["--format", "pretty", "diag", "--file", path_arg]);
    let _ = std::fs::remove_file(&path);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "NaN\n");
}

#[test]
fn diag_raw_reencodes_canonically() {
    let output = cborprims(&["--format", "raw", "diag", "5f4201024103ff"]);

    assert!(output.status.success());
    assert_eq!(output.stdout, [0x43, 0x01, 0x02, 0x03]);
}

#[test]
fn diag_malformed_input_exits_60() {
    let output = cborprims(&["--format", "json", "diag", "1c"]);

    assert_eq!(output.status.code(), Some(60));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid additional info 28"));
}

#[test]
fn diag_respects_max_depth() {
    let output = cborprims(&["--max-depth", "1", "--format", "pretty", "diag", "818100"]);
    assert_eq!(output.status.code(), Some(60));

    let output = cborprims(&["--max-depth", "2", "--format", "pretty", "diag", "818100"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "[[0]]\n");
}

#[test]
fn invalid_hex_is_usage_error() {
    let output = cborprims(&["diag", "zz"]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn validate_accepts_single_item() {
    let output = cborprims(&["--format", "json", "validate", "a201020304"]);

    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_str(stdout(&output).trim()).expect("validate output should be JSON");
    assert_eq!(json["valid"], true);
    assert_eq!(json["size"], 5);
    assert!(json["error"].is_null());
}

#[test]
fn validate_rejects_trailing_bytes() {
    let output = cborprims(&["--format", "json", "validate", "0100"]);

    assert_eq!(output.status.code(), Some(60));
    let json: serde_json::Value =
        serde_json::from_str(stdout(&output).trim()).expect("validate output should be JSON");
    assert_eq!(json["valid"], false);
    assert_eq!(json["error"], "1 trailing bytes after item");
}

#[test]
fn validate_rejects_truncated_input() {
    let output = cborprims(&["--format", "pretty", "validate", "83 01 02"]);

    assert_eq!(output.status.code(), Some(60));
    assert!(stdout(&output).starts_with("invalid:"));
}

#[test]
fn encode_json_prints_hex() {
    let output = cborprims(&[
        "--format",
        "pretty",
        "encode",
        "--json",
        "{\"a\": 1, \"b\": [2, 3]}",
    ]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "a26161016162820203\n");
}

#[test]
fn encode_json_output_has_diagnostic() {
    let output = cborprims(&["--format", "json", "encode", "--json", "[-1, 1.5, null]"]);

    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_str(stdout(&output).trim()).expect("encode output should be JSON");
    assert_eq!(json["hex"], "8320fa3fc00000f6");
    assert_eq!(json["size"], 8);
    assert_eq!(json["diagnostic"], "[-1, 1.5, null]");
}

#[test]
fn encode_raw_writes_bytes() {
    let output = cborprims(&["--format", "raw", "encode", "--json", "\"IETF\""]);

    assert!(output.status.success());
    assert_eq!(output.stdout, [0x64, b'I', b'E', b'T', b'F']);
}

#[test]
fn encode_rejects_bad_json() {
    let output = cborprims(&["encode", "--json", "{"]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn version_prints_package_version() {
    let output = cborprims(&["version"]);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        format!("cborprims {}\n", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn envinfo_json_reports_limits() {
    let output = cborprims(&["--format", "json", "--max-depth", "7", "envinfo"]);

    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_str(stdout(&output).trim()).expect("envinfo output should be JSON");
    assert_eq!(json["limits"]["max_depth"], 7);
    assert!(json["features"]
        .as_array()
        .is_some_and(|features| features.iter().any(|f| f == "cli")));
}
