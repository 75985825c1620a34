//! CLI smoke tests: basic binary behavior.

use std::io::Write;
use std::process::{Command, Stdio};

fn cli_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_solace"))
}

#[test]
fn test_help_flag() {
    let output = cli_bin().arg("--help").output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"), "Expected usage info in --help output");
    assert!(stdout.contains("serve"));
}

#[test]
fn test_version_flag() {
    let output = cli_bin().arg("--version").output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("solace"),
        "Expected binary name in --version output"
    );
}

#[test]
fn test_invalid_config_does_not_panic() {
    let output = cli_bin()
        .arg("--config")
        .arg("/tmp/nonexistent_solace_config_12345.toml")
        .arg("--help")
        .output()
        .expect("failed to run");
    assert!(output.status.success());
}

#[test]
fn test_chat_session_saves_memory() {
    let dir = tempfile::TempDir::new().unwrap();
    let memory_path = dir.path().join("memory.json");

    let mut child = cli_bin()
        .arg("--config")
        .arg(dir.path().join("missing.toml"))
        .arg("chat")
        .env("SOLACE_MEMORY_PATH", &memory_path)
        .env("SOLACE_BOT_NAME", "Solace")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to run");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"my name is Alex\nexit\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Nice to meet you, Alex!"), "stdout: {}", stdout);

    let saved = std::fs::read_to_string(&memory_path).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(doc["username"], "Alex");
    // name intro plus farewell
    assert_eq!(doc["relationship_level"], 2);
}

#[test]
fn test_unreadable_memory_is_set_aside_not_overwritten() {
    let dir = tempfile::TempDir::new().unwrap();
    let memory_path = dir.path().join("memory.json");
    std::fs::write(&memory_path, "{ not json").unwrap();

    let mut child = cli_bin()
        .arg("--config")
        .arg(dir.path().join("missing.toml"))
        .arg("chat")
        .env("SOLACE_MEMORY_PATH", &memory_path)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to run");

    child.stdin.take().unwrap().write_all(b"exit\n").unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let backup = dir.path().join("memory.json.bak");
    assert_eq!(std::fs::read_to_string(backup).unwrap(), "{ not json");
    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&memory_path).unwrap()).unwrap();
    assert_eq!(saved["relationship_level"], 1);
}
