//! Integration tests for `shelflife check`.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn shelflife_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_shelflife"))
}

fn run_cli(args: &[&str]) -> Output {
    Command::new(shelflife_bin())
        .args(args)
        .env("RUST_LOG", "error")
        .output()
        .expect("failed to execute shelflife CLI")
}

fn parse_stats(output: &Output) -> BTreeMap<String, u64> {
    assert!(
        output.status.success(),
        "check failed\nstdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("check must print a JSON stats object")
}

/// One KBART row with the given (column, value) overrides.
fn row(overrides: &[(usize, &str)]) -> String {
    let mut fields = vec![""; 23];
    for &(column, value) in overrides {
        fields[column] = value;
    }
    fields.join("\t")
}

#[test]
fn check_aggregates_row_errors_per_kind() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("holdings.tsv");
    let content = format!(
        "header line\n{}\nshort\tline\n{}\n{}\n{}\n",
        row(&[(1, "0006-2499"), (3, "1968"), (6, "1996")]),
        row(&[(0, "Journal without identifiers")]),
        row(&[(1, "1234-5678"), (12, "10M")]),
        row(&[(1, "8765-4321"), (12, "R99999999999999999999Y")]),
    );
    fs::write(&path, content).unwrap();

    let output = run_cli(&["check", "--skip-header", path.to_str().unwrap()]);
    let stats = parse_stats(&output);

    assert_eq!(stats.get("records"), Some(&5));
    assert_eq!(stats.get("incomplete line"), Some(&1));
    assert_eq!(stats.get("missing identifiers"), Some(&1));
    assert_eq!(stats.get("incomplete embargo"), Some(&1));
    assert_eq!(stats.get("invalid embargo"), Some(&1));
}

#[test]
fn check_clean_file_reports_only_records() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("holdings.tsv");
    let content = format!(
        "{}\n{}\n",
        row(&[(1, "0006-2499"), (3, "1968")]),
        row(&[(2, "1943-0000"), (3, "2001"), (12, "R1Y")]),
    );
    fs::write(&path, content).unwrap();

    let output = run_cli(&["check", path.to_str().unwrap()]);
    let stats = parse_stats(&output);

    assert_eq!(stats.get("records"), Some(&2));
    assert_eq!(stats.len(), 1, "clean files report nothing but the count");
}

#[test]
fn check_reads_stdin_when_no_file_is_given() {
    let mut child = Command::new(shelflife_bin())
        .arg("check")
        .env("RUST_LOG", "error")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn shelflife CLI");

    let content = format!("{}\nshort\n", row(&[(1, "0006-2499")]));
    child
        .stdin
        .take()
        .expect("stdin handle")
        .write_all(content.as_bytes())
        .unwrap();

    let output = child.wait_with_output().unwrap();
    let stats = parse_stats(&output);
    assert_eq!(stats.get("records"), Some(&2));
    assert_eq!(stats.get("incomplete line"), Some(&1));
}
