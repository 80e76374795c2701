//! Binary integration tests for CLI commands
//!
//! These tests run the actual gotocommit binary to exercise the CLI code paths.

#![expect(clippy::unwrap_used, reason = "integration test assertions")]

use std::process::Command;

use crate::common::TestFixture;

fn gotocommit_bin(fixture: &TestFixture) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_gotocommit"));
    cmd.arg("-C").arg(&fixture.repo_path);
    cmd.env_remove("DEBUG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_gotocommit"))
        .arg("--help")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("resolve"));
    assert!(stdout.contains("--no-clipboard"));
}

#[test]
fn test_cli_invalid_argument_shows_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_gotocommit"))
        .arg("--invalid-flag")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error:"));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
}

#[test]
fn test_cli_resolve_head() {
    let fixture = TestFixture::new().unwrap();
    let output = gotocommit_bin(&fixture)
        .args(["resolve", "HEAD"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), fixture.third.to_string());
}

#[test]
fn test_cli_resolve_annotated_tag_to_commit() {
    let fixture = TestFixture::new().unwrap();
    let output = gotocommit_bin(&fixture)
        .args(["resolve", "v2.0"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), fixture.second.to_string());
}

#[test]
fn test_cli_resolve_unknown_fails() {
    let fixture = TestFixture::new().unwrap();
    let output = gotocommit_bin(&fixture)
        .args(["resolve", "no-such-thing"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Revision not found: 'no-such-thing'"));
}

#[test]
fn test_cli_tags_newest_first() {
    let fixture = TestFixture::new().unwrap();
    let output = gotocommit_bin(&fixture).arg("tags").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            format!("v2.0\t{}", fixture.second),
            format!("v1.0\t{}", fixture.first),
        ]
    );
}

#[test]
fn test_cli_branches_json() {
    let fixture = TestFixture::new().unwrap();
    let output = gotocommit_bin(&fixture)
        .args(["branches", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let entries: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<_> = entries
        .iter()
        .filter_map(|e| e["name"].as_str())
        .collect();
    assert_eq!(names, vec!["feature", "master", "origin/master"]);
    assert_eq!(entries[2]["kind"], "remote_branch");
    assert_eq!(entries[1]["commit_id"], fixture.third.to_string());
}

#[test]
fn test_cli_outside_repository_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_gotocommit"))
        .arg("-C")
        .arg(dir.path())
        .args(["resolve", "HEAD"])
        .output()
        .unwrap();

    assert!(!output.status.success());
}
