// tests/common/mod.rs
// Shared test utilities for integration tests
#![allow(dead_code)]

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use logsift::LogEntry;

const BINARY_PATH: &str = env!("CARGO_BIN_EXE_logsift");

/// Run logsift with given arguments and input via stdin; config files are ignored
pub fn run_logsift_with_input(args: &[&str], input: &str) -> (String, String, i32) {
    let mut cmd = Command::new(BINARY_PATH)
        .arg("--ignore-config")
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start logsift");

    if let Some(mut stdin) = cmd.stdin.take() {
        // Usage errors exit before reading stdin; a broken pipe here is expected
        let _ = stdin.write_all(input.as_bytes());
    }

    let output = cmd.wait_with_output().expect("Failed to read output");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

/// Like `run_logsift_with_input`, but config files are honoured
pub fn run_logsift_with_config(args: &[&str], input: &str) -> (String, String, i32) {
    let mut cmd = Command::new(BINARY_PATH)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start logsift");

    if let Some(mut stdin) = cmd.stdin.take() {
        let _ = stdin.write_all(input.as_bytes());
    }

    let output = cmd.wait_with_output().expect("Failed to read output");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

/// Run logsift with the given arguments and no stdin
pub fn run_logsift(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(BINARY_PATH)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute logsift");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

/// Parse a JSON document written by logsift
pub fn read_entries(path: &Path) -> Vec<LogEntry> {
    let text = std::fs::read_to_string(path).expect("Failed to read output document");
    serde_json::from_str(&text).expect("Output should be a JSON array of entries")
}

/// Entries sorted by original text, for comparisons that ignore arrival order
pub fn sorted(mut entries: Vec<LogEntry>) -> Vec<LogEntry> {
    entries.sort_by(|a, b| a.original.cmp(&b.original));
    entries
}

/// Helper to extract a counter from the `--stats` line, e.g. "matched"
pub fn extract_stat(stderr: &str, label: &str) -> Option<usize> {
    let line = stderr.lines().find(|l| l.starts_with("Lines processed:"))?;
    line.split([',', ';', ':'])
        .map(str::trim)
        .find_map(|part| part.strip_suffix(label))
        .and_then(|n| n.trim().split_whitespace().last())
        .and_then(|n| n.parse().ok())
}
