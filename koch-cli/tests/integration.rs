//! Integration tests for koch CLI commands.
//!
//! These tests run the actual binary and verify end-to-end behavior.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn koch(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_koch"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to execute command")
}

/// Path to the bundled example scene.
fn snowflake_scene() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenes/snowflake.yaml")
}

#[test]
fn draw_defaults_to_svg_on_stdout() {
    let output = koch(&["draw"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("<?xml"), "Should have XML declaration");
    assert!(stdout.contains("<svg"), "Should have SVG element");
    assert!(stdout.contains(r#"viewBox="-400 -300 800 600""#));
    assert!(stdout.contains(r#"stroke="blue""#), "Default pen color is blue");
    assert_eq!(stdout.matches("<polyline").count(), 1, "One continuous stroke");
    assert!(stdout.contains("</svg>"), "Should close SVG element");
}

#[test]
fn draw_depth_zero_is_a_straight_line() {
    let output = koch(&["draw", "-d", "0", "-l", "400", "-f", "svg"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(r#"points="-200.000,0.000 200.000,0.000""#), "{}", stdout);
}

#[test]
fn draw_json_reports_segments() {
    let output = koch(&["draw", "--json", "-d", "3"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("Should be valid JSON");
    assert_eq!(json["stats"]["segments"], 64);
    assert_eq!(json["scene"]["depth"], 3);

    let points = json["strokes"][0]["points"].as_array().unwrap();
    assert_eq!(points.len(), 65);
    let last = points.last().unwrap();
    assert!((last["x"].as_f64().unwrap() - 200.0).abs() < 1e-9);
    assert!(last["y"].as_f64().unwrap().abs() < 1e-9);
}

#[test]
fn draw_png_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("koch.png");

    let output = koch(&["draw", "-d", "2", "-o", path.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let bytes = fs::read(&path).expect("PNG should be written");
    assert_eq!(&bytes[..4], b"\x89PNG", "Format is inferred from the extension");
    assert!(output.stdout.is_empty(), "Nothing goes to stdout when writing a file");
}

#[test]
fn draw_scene_file() {
    let output = koch(&["draw", "-c", snowflake_scene().to_str().unwrap(), "--json"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["scene"]["shape"], "snowflake");
    assert_eq!(json["stats"]["segments"], 3 * 256);
    assert_eq!(json["strokes"][0]["color"], "navy");
}

#[test]
fn flags_override_scene_file() {
    let output = koch(&[
        "draw", "-c", snowflake_scene().to_str().unwrap(), "-d", "1", "--color", "red", "--json",
    ]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["stats"]["segments"], 12);
    assert_eq!(json["strokes"][0]["color"], "red");
}

#[test]
fn commands_prints_motif() {
    let output = koch(&["commands", "-d", "1", "-l", "300"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, ["F100", "L60", "F100", "R120", "F100", "L60", "F100"]);
}

#[test]
fn commands_json_round_trips_counts() {
    let output = koch(&["commands", "-d", "2", "-l", "90", "--json"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let commands = json.as_array().unwrap();
    assert_eq!(commands.len(), 31);
    let forwards = commands.iter().filter(|c| c["op"] == "forward").count();
    assert_eq!(forwards, 16);
    assert_eq!(commands[0]["value"], 10.0);
}

#[test]
fn negative_depth_is_rejected() {
    let output = koch(&["draw", "-d", "-2"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("non-negative"), "stderr: {}", stderr);
}

#[test]
fn non_positive_length_is_rejected() {
    let output = koch(&["commands", "-l", "0"]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("length must be positive"), "stderr: {}", stderr);
}

#[test]
fn depth_cap_is_enforced() {
    let output = koch(&["draw", "-d", "11"]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("exceeds the maximum"), "stderr: {}", stderr);
}

#[test]
fn unknown_command_fails() {
    let output = koch(&["sparkle"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown command"));
}

#[test]
fn help_succeeds() {
    let output = koch(&["help"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage:"));
}
