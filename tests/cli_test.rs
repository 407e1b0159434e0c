//! CLI contract tests
//!
//! Runs the built binary on local input only; no network access.

use std::io::Write;
use std::process::{Command, Stdio};

fn authorscan_bin() -> String {
    env!("CARGO_BIN_EXE_authorscan").to_string()
}

const SAMPLE_JS: &str = "const userName = getUserName();\nconst userEmail = getUserEmail();\n// TODO: lol fix this later\nvar x = foo(1,2)\n";

fn write_sample(dir: &tempfile::TempDir, name: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, SAMPLE_JS).unwrap();
    path
}

#[test]
fn test_snippet_json_output_is_valid() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(&dir, "sample.js");

    let output = Command::new(authorscan_bin())
        .args(["--format", "json", "snippet"])
        .arg(&path)
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["language"], "javascript");
    assert_eq!(parsed["total_lines"], 4);
    assert_eq!(parsed["line_verdicts"].as_array().unwrap().len(), 4);
}

#[test]
fn test_snippet_reads_stdin_with_explicit_language() {
    let mut child = Command::new(authorscan_bin())
        .args(["snippet", "--lang", "python", "--format", "json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"def add(a, b):\n    return a + b\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["language"], "python");
    assert_eq!(parsed["total_lines"], 2);
}

#[test]
fn test_snippet_text_lines_flag() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(&dir, "sample.js");

    let output = Command::new(authorscan_bin())
        .args(["snippet", "--lines"])
        .arg(&path)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("javascript"));
    assert!(stdout.contains("TODO: lol fix this later"));
}

#[test]
fn test_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();

    let output = Command::new(authorscan_bin())
        .arg("snippet")
        .arg(dir.path().join("missing.rs"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read"));
}

#[test]
fn test_invalid_repository_identifier_fails_fast() {
    let output = Command::new(authorscan_bin())
        .args(["repo", "not a repository", "--format", "json"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid repository identifier"));
}

#[test]
fn test_unknown_format_rejected() {
    let output = Command::new(authorscan_bin())
        .args(["--format", "sarif", "snippet"])
        .output()
        .unwrap();

    assert!(!output.status.success());
}
