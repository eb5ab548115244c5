// CLI integration tests for local echo, comparison, and variant listing.
use std::io::Write;
use std::process::{Command, Stdio};

use serde_json::Value;

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_jsonecho");
    Command::new(exe)
}

fn run_with_stdin(args: &[&str], input: &[u8]) -> std::process::Output {
    let mut child = cmd()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(input)
        .expect("write stdin");
    child.wait_with_output().expect("output")
}

#[test]
fn echo_reads_file_and_writes_exact_bytes() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("input.json");
    std::fs::write(&path, br#"{ "x": +1.10, "a": [1, 2] }"#).expect("write input");

    let output = cmd()
        .args(["echo", "--variant", "hapiecho", path.to_str().unwrap()])
        .output()
        .expect("echo");
    assert!(output.status.success());
    assert_eq!(output.stdout, br#"{"x":1.10,"a":[1,2]}"#);
}

#[test]
fn echo_reads_stdin_with_default_variant() {
    let output = run_with_stdin(&["echo"], br#"{"b":1,"a":2}"#);
    assert!(output.status.success());
    assert_eq!(output.stdout, br#"{"b":1,"a":2}"#);
}

#[test]
fn echo_failure_emits_json_error_and_exit_code() {
    let output = run_with_stdin(&["echo", "--variant", "ibmecho"], br#"{"a":1,"a":2}"#);
    assert_eq!(output.status.code(), Some(5));
    let stderr = String::from_utf8_lossy(&output.stderr);
    let envelope: Value = serde_json::from_str(stderr.trim()).expect("json error");
    assert_eq!(envelope["error"]["kind"], "DuplicateKey");
    assert_eq!(envelope["error"]["key"], "a");
}

#[test]
fn echo_logs_go_to_stderr_when_enabled() {
    let mut child = cmd()
        .args(["echo", "--variant", "openmrsecho"])
        .env("RUST_LOG", "debug")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(br#"{"a":1} trailing"#)
        .expect("write stdin");
    let output = child.wait_with_output().expect("output");
    assert!(output.status.success());
    assert_eq!(output.stdout, br#"{"a":1}"#);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ignoring trailing content"), "stderr: {stderr}");
}

#[test]
fn unknown_variant_exits_not_found() {
    let output = run_with_stdin(&["echo", "--variant", "nope"], b"{}");
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn missing_input_file_exits_not_found() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("missing.json");
    let output = cmd()
        .args(["echo", path.to_str().unwrap()])
        .output()
        .expect("echo");
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn compare_prints_one_line_per_variant() {
    let output = run_with_stdin(&["compare"], br#"{"x":+1.10}"#);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines.contains(&r#"hapiecho: {"x":1.10}"#));
    assert!(
        lines
            .iter()
            .any(|line| line.starts_with("ibmecho: error: NumberSyntax"))
    );
    assert!(
        lines
            .iter()
            .any(|line| line.starts_with("echo: error: NumberSyntax"))
    );
}

#[test]
fn variants_lists_policies() {
    let output = cmd().arg("variants").output().expect("variants");
    assert!(output.status.success());
    let listing: Value =
        serde_json::from_slice(&output.stdout).expect("json listing");
    let variants = listing["variants"].as_array().expect("array");
    assert_eq!(variants.len(), 6);
    assert_eq!(variants[0]["name"], "echo");
}

#[test]
fn bad_serve_bind_is_usage_error() {
    let output = cmd()
        .args(["serve", "--bind", "not-an-address"])
        .output()
        .expect("serve");
    assert_eq!(output.status.code(), Some(2));
}
