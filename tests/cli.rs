//! Binary-level checks that need no network access

use std::process::{Command, Output};

fn pagelens(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pagelens"))
        .args(args)
        .env_remove("OPENAI_API_KEY")
        .output()
        .expect("failed to run pagelens")
}

#[test]
fn test_help_lists_flags() {
    let output = pagelens(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--report"));
    assert!(stdout.contains("--compact"));
}

#[test]
fn test_version() {
    let output = pagelens(&["--version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_url_is_usage_error() {
    let output = pagelens(&[]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_rejects_non_http_scheme() {
    let output = pagelens(&["ftp://example.com/file"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid URL"), "{stderr}");
}
