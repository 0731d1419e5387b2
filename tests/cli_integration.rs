//! Integration tests for the `td` CLI.
//!
//! Each test creates a temp directory, writes a config pointing at a stub
//! server (or at nothing), runs `td` as a subprocess, and checks its output.

mod common;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use common::{ROWS_JSON, StubServer};

/// Get the path to the built `td` binary.
fn td_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("td");
    path
}

fn write_config(dir: &Path, url: &str) {
    fs::write(
        dir.join("taskdeck.toml"),
        format!(
            "[remote]\nurl = \"{}\"\napi_key = \"anon-key\"\ntimeout_secs = 5\n",
            url
        ),
    )
    .unwrap();
}

/// Run td in the given directory, returning (stdout, stderr, success).
fn run_td(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(td_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("TASKDECK_CONFIG")
        .env_remove("TASKDECK_URL")
        .env_remove("TASKDECK_API_KEY")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run td");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

fn run_td_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_td(dir, args);
    assert!(
        success,
        "td {:?} failed:\nstdout: {}\nstderr: {}",
        args, stdout, stderr
    );
    stdout
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

#[test]
fn test_init_writes_config() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_td_ok(
        tmp.path(),
        &["init", "--url", "https://abcd.supabase.co", "--key", "anon"],
    );
    assert!(out.contains("taskdeck.toml"));

    let text = fs::read_to_string(tmp.path().join("taskdeck.toml")).unwrap();
    let doc: toml::Value = toml::from_str(&text).unwrap();
    assert_eq!(doc["remote"]["url"].as_str(), Some("https://abcd.supabase.co"));
    assert_eq!(doc["remote"]["api_key"].as_str(), Some("anon"));
    assert_eq!(doc["remote"]["table"].as_str(), Some("tasks"));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_td_ok(tmp.path(), &["init"]);
    let (_, stderr, success) = run_td(tmp.path(), &["init"]);
    assert!(!success);
    assert!(stderr.contains("already exists"));
    run_td_ok(tmp.path(), &["init", "--force", "--table", "todo"]);
    let text = fs::read_to_string(tmp.path().join("taskdeck.toml")).unwrap();
    assert!(text.contains("table = \"todo\""));
}

#[test]
fn test_init_rejects_bad_table_name() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, stderr, success) = run_td(tmp.path(), &["init", "--table", "a/b"]);
    assert!(!success);
    assert!(stderr.contains("invalid table name"));
    assert!(!tmp.path().join("taskdeck.toml").exists());
}

// ---------------------------------------------------------------------------
// config errors
// ---------------------------------------------------------------------------

#[test]
fn test_missing_url_is_reported() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_td_ok(tmp.path(), &["init"]);
    let (_, stderr, success) = run_td(tmp.path(), &["list"]);
    assert!(!success);
    assert!(stderr.contains("error: remote.url is not set"));
}

#[test]
fn test_explicit_missing_config() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, stderr, success) = run_td(tmp.path(), &["-c", "nope.toml", "list"]);
    assert!(!success);
    assert!(stderr.contains("nope.toml"));
}

#[test]
fn test_config_found_from_subdirectory() {
    let tmp = tempfile::TempDir::new().unwrap();
    let server = StubServer::start(vec![(200, "[]")]);
    write_config(tmp.path(), &server.url);
    let nested = tmp.path().join("a/b");
    fs::create_dir_all(&nested).unwrap();

    let out = run_td_ok(&nested, &["list"]);
    assert!(out.contains("No tasks found"));
    server.finish();
}

// ---------------------------------------------------------------------------
// list / add / edit / delete
// ---------------------------------------------------------------------------

#[test]
fn test_list_text() {
    let tmp = tempfile::TempDir::new().unwrap();
    let server = StubServer::start(vec![(200, ROWS_JSON)]);
    write_config(tmp.path(), &server.url);

    let out = run_td_ok(tmp.path(), &["list"]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("2  Write report  ("));
    assert!(lines[1].starts_with("1  Call mom  ("));
    server.finish();
}

#[test]
fn test_list_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    let server = StubServer::start(vec![(200, ROWS_JSON)]);
    write_config(tmp.path(), &server.url);

    let out = run_td_ok(tmp.path(), &["--json", "list"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    let arr = parsed.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["id"], 2);
    assert_eq!(arr[0]["task"], "Write report");
    assert_eq!(arr[0]["created_at"], "2025-05-14T09:01:00Z");
    server.finish();
}

#[test]
fn test_add_inserts_then_lists() {
    let tmp = tempfile::TempDir::new().unwrap();
    let server = StubServer::start(vec![
        (
            201,
            r#"[{"id":3,"task":"Buy milk","created_at":"2025-05-14T09:02:00+00:00"}]"#,
        ),
        (
            200,
            r#"[{"id":3,"task":"Buy milk","created_at":"2025-05-14T09:02:00+00:00"}]"#,
        ),
    ]);
    write_config(tmp.path(), &server.url);

    let out = run_td_ok(tmp.path(), &["add", "Buy milk"]);
    assert!(out.contains("Buy milk"));

    let requests = server.finish();
    let methods: Vec<&str> = requests.iter().map(|r| r.method.as_str()).collect();
    assert_eq!(methods, vec!["POST", "GET"]);
    assert!(requests[0].body.contains("\"task\":\"Buy milk\""));
}

#[test]
fn test_add_blank_fails_without_network() {
    let tmp = tempfile::TempDir::new().unwrap();
    // Nothing listens here; the command must fail before connecting
    write_config(tmp.path(), "http://127.0.0.1:9");
    let (stdout, stderr, success) = run_td(tmp.path(), &["add", "   "]);
    assert!(!success);
    assert!(stdout.is_empty());
    assert_eq!(stderr.trim(), "error: task cannot be empty");
}

#[test]
fn test_edit_fetches_patches_and_lists() {
    let tmp = tempfile::TempDir::new().unwrap();
    let server = StubServer::start(vec![
        (200, ROWS_JSON),
        (204, ""),
        (
            200,
            r#"[{"id":2,"task":"Write report","created_at":"2025-05-14T09:01:00+00:00"},
                {"id":1,"task":"Call dad","created_at":"2025-05-14T09:00:00+00:00"}]"#,
        ),
    ]);
    write_config(tmp.path(), &server.url);

    let out = run_td_ok(tmp.path(), &["edit", "1", "Call dad"]);
    assert!(out.contains("Call dad"));

    let requests = server.finish();
    assert_eq!(requests[1].method, "PATCH");
    assert_eq!(requests[1].target, "/rest/v1/tasks?id=eq.1");
    assert!(requests[1].body.contains("Call dad"));
}

#[test]
fn test_edit_unknown_id() {
    let tmp = tempfile::TempDir::new().unwrap();
    let server = StubServer::start(vec![(200, ROWS_JSON)]);
    write_config(tmp.path(), &server.url);

    let (_, stderr, success) = run_td(tmp.path(), &["edit", "99", "nope"]);
    assert!(!success);
    assert!(stderr.contains("error: no task with id 99"));
    assert_eq!(server.finish().len(), 1);
}

#[test]
fn test_delete_then_lists() {
    let tmp = tempfile::TempDir::new().unwrap();
    let server = StubServer::start(vec![(204, ""), (200, "[]")]);
    write_config(tmp.path(), &server.url);

    let out = run_td_ok(tmp.path(), &["delete", "1"]);
    assert!(out.contains("No tasks found"));

    let requests = server.finish();
    assert_eq!(requests[0].method, "DELETE");
    assert_eq!(requests[0].target, "/rest/v1/tasks?id=eq.1");
}

// ---------------------------------------------------------------------------
// remote failures
// ---------------------------------------------------------------------------

#[test]
fn test_server_message_on_stderr() {
    let tmp = tempfile::TempDir::new().unwrap();
    let server = StubServer::start(vec![(401, r#"{"message":"Invalid API key"}"#)]);
    write_config(tmp.path(), &server.url);

    let (stdout, stderr, success) = run_td(tmp.path(), &["list"]);
    assert!(!success);
    assert!(stdout.is_empty());
    assert_eq!(stderr.trim(), "error: Invalid API key");
    server.finish();
}

#[test]
fn test_unreachable_remote() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_config(tmp.path(), "http://127.0.0.1:9");
    let (_, stderr, success) = run_td(tmp.path(), &["list"]);
    assert!(!success);
    assert!(stderr.contains("error: network error"));
}

#[test]
fn test_logs_written_next_to_config() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_config(tmp.path(), "http://127.0.0.1:9");
    let _ = run_td(tmp.path(), &["list"]);
    let log_dir = tmp.path().join(".taskdeck/logs");
    let entries: Vec<_> = fs::read_dir(&log_dir).unwrap().collect();
    assert!(!entries.is_empty());
}
