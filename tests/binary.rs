//! Runs of the compiled `lifecycle-hooks` binary, checking the stdout contract

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use std::time::{Duration, Instant};

use lifecycle_hooks::rules::BLOCKED_COMMAND_MESSAGE;
use serde_json::Value;
use tempfile::TempDir;

/// The binary with a clean environment rooted at `dir`
fn hook_command(dir: &Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_lifecycle-hooks"));
    command
        .current_dir(dir)
        .env("HOME", dir)
        .env_remove("CLAUDE_COMMAND")
        .env_remove("CLAUDE_PROJECT_DIR")
        .env_remove("CLAUDE_HOOK_TIMEOUT_MS")
        .env_remove("RUST_LOG")
        .stdin(Stdio::null());
    command
}

/// The single JSON decision on stdout, after checking the exit status
fn decision(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "exit status {:?}, stderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout.clone()).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1, "stdout: {stdout:?}");
    serde_json::from_str(lines[0]).unwrap()
}

#[test]
fn test_validate_command_blocks() {
    let temp_dir = TempDir::new().unwrap();
    let output = hook_command(temp_dir.path())
        .args(["validate-command", "rm -rf /"])
        .output()
        .unwrap();

    let decision = decision(&output);
    assert_eq!(decision["block"], Value::Bool(true));
    assert_eq!(decision["message"], Value::from(BLOCKED_COMMAND_MESSAGE));
}

#[test]
fn test_safe_command_allows() {
    let temp_dir = TempDir::new().unwrap();
    let output = hook_command(temp_dir.path())
        .args(["validate-command", "ls -la"])
        .output()
        .unwrap();

    assert_eq!(decision(&output), serde_json::json!({"block": false}));
}

#[test]
fn test_unknown_hook_fails_open() {
    let temp_dir = TempDir::new().unwrap();
    let output = hook_command(temp_dir.path())
        .arg("deploy")
        .output()
        .unwrap();

    assert_eq!(decision(&output), serde_json::json!({"block": false}));
    assert!(!output.stderr.is_empty());
}

#[test]
fn test_stdin_json_input() {
    let temp_dir = TempDir::new().unwrap();
    let body = serde_json::json!({
        "cwd": temp_dir.path(),
        "hook_event_name": "PreToolUse",
        "tool_name": "Bash",
        "tool_input": {"command": "git push --force origin main"}
    });

    let mut child = hook_command(temp_dir.path())
        .args(["pre-command", "--stdin"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(body.to_string().as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();

    let decision = decision(&output);
    assert_eq!(decision["block"], Value::Bool(true));
}

#[test]
fn test_stdin_left_open_still_decides() {
    let temp_dir = TempDir::new().unwrap();
    let mut child = hook_command(temp_dir.path())
        .args(["pre-command", "--stdin"])
        .env("CLAUDE_HOOK_TIMEOUT_MS", "200")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    // Held open for the whole run
    let mut stdin = child.stdin.take().unwrap();
    stdin.write_all(b"{\"tool_input\":").unwrap();

    let started = Instant::now();
    let output = child.wait_with_output().unwrap();
    drop(stdin);

    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(decision(&output), serde_json::json!({"block": false}));
}
