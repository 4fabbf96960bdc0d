//! End-to-end CLI tests for the earthfetch binary.
//!
//! The async tests spawn the real binary against a wiremock server. They
//! use a multi-thread runtime because the binary is waited on
//! synchronously while the mock server keeps serving.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn earthfetch() -> Command {
    Command::cargo_bin("earthfetch").unwrap()
}

/// A fully-flagged invocation running in `workdir` (where download.log
/// lands).
fn authed_cmd(workdir: &Path, save_dir: &Path, list_path: &Path) -> Command {
    let mut cmd = earthfetch();
    cmd.current_dir(workdir)
        .arg("--save-dir")
        .arg(save_dir)
        .arg("--username")
        .arg("user")
        .arg("--password")
        .arg("pass")
        .arg("--txt-dir")
        .arg(list_path);
    cmd
}

fn write_list(dir: &Path, urls: &[String]) -> std::path::PathBuf {
    let list_path = dir.join("urls.txt");
    std::fs::write(&list_path, urls.join("\n")).unwrap();
    list_path
}

/// Test that invoking without the required flags fails and names them.
#[test]
fn test_binary_requires_all_flags() {
    earthfetch()
        .assert()
        .failure()
        .stderr(predicate::str::contains("--save-dir"))
        .stderr(predicate::str::contains("--username"))
        .stderr(predicate::str::contains("--password"))
        .stderr(predicate::str::contains("--txt-dir"));
}

/// --help must mention every flag and exit zero.
#[test]
fn test_binary_help_lists_every_flag() {
    earthfetch()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--save-dir"))
        .stdout(predicate::str::contains("--username"))
        .stdout(predicate::str::contains("--password"))
        .stdout(predicate::str::contains("--txt-dir"));
}

/// --version prints the binary name and exits zero.
#[test]
fn test_binary_version_prints_name() {
    earthfetch()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("earthfetch"));
}

/// Test that short flags are not defined.
#[test]
fn test_binary_rejects_short_flags() {
    earthfetch()
        .args(["-s", "/tmp"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected argument"));
}

/// Test that an unreadable URL list is fatal.
#[test]
fn test_binary_missing_list_file_is_fatal() {
    let dir = TempDir::new().unwrap();

    authed_cmd(
        dir.path(),
        &dir.path().join("out"),
        Path::new("/nonexistent-earthfetch-e2e/urls.txt"),
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("URL list"));
}

/// Test that a list without usable entries is fatal.
#[test]
fn test_binary_empty_list_is_fatal() {
    let dir = TempDir::new().unwrap();
    let list_path = dir.path().join("urls.txt");
    std::fs::write(&list_path, "\n  \n,\n").unwrap();

    authed_cmd(dir.path(), &dir.path().join("out"), &list_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no URLs"));
}

/// Test that per-file failures do not fail the process.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_binary_exits_zero_despite_item_failures() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/data/broken.nc"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let list_path = write_list(dir.path(), &[format!("{}/data/broken.nc", server.uri())]);

    authed_cmd(dir.path(), &dir.path().join("out"), &list_path)
        .assert()
        .success();

    let log = std::fs::read_to_string(dir.path().join("download.log")).unwrap();
    assert!(
        log.contains("max retries reached"),
        "log should record the exhausted retries: {log}"
    );
}

/// Test a complete run: file on disk, summary in the log.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_binary_downloads_and_logs_the_run() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let save_dir = dir.path().join("out");

    Mock::given(method("GET"))
        .and(path("/data/granule.nc"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"sea surface data"))
        .mount(&server)
        .await;

    let list_path = write_list(dir.path(), &[format!("{}/data/granule.nc", server.uri())]);

    authed_cmd(dir.path(), &save_dir, &list_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("all downloads processed"));

    assert_eq!(
        std::fs::read(save_dir.join("granule.nc")).unwrap(),
        b"sea surface data"
    );

    let log = std::fs::read_to_string(dir.path().join("download.log")).unwrap();
    assert!(log.contains("run complete"), "log should summarize: {log}");
}

/// Test that files already in the save directory produce no requests.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_binary_skips_existing_files() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let save_dir = dir.path().join("out");

    std::fs::create_dir_all(&save_dir).unwrap();
    std::fs::write(save_dir.join("existing.nc"), b"already here").unwrap();

    let list_path = write_list(dir.path(), &[format!("{}/data/existing.nc", server.uri())]);

    authed_cmd(dir.path(), &save_dir, &list_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("skipping existing file"));

    assert!(
        server.received_requests().await.unwrap().is_empty(),
        "no request should be made for a file already on disk"
    );
    assert_eq!(
        std::fs::read(save_dir.join("existing.nc")).unwrap(),
        b"already here"
    );
}

/// Test that proxy environment variables do not affect the client.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_binary_ignores_proxy_environment() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let save_dir = dir.path().join("out");

    Mock::given(method("GET"))
        .and(path("/data/granule.nc"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"direct"))
        .mount(&server)
        .await;

    let list_path = write_list(dir.path(), &[format!("{}/data/granule.nc", server.uri())]);

    // Nothing listens on port 1; honoring these would fail every request.
    authed_cmd(dir.path(), &save_dir, &list_path)
        .env("HTTP_PROXY", "http://127.0.0.1:1")
        .env("HTTPS_PROXY", "http://127.0.0.1:1")
        .env("http_proxy", "http://127.0.0.1:1")
        .env("https_proxy", "http://127.0.0.1:1")
        .assert()
        .success();

    assert_eq!(std::fs::read(save_dir.join("granule.nc")).unwrap(), b"direct");
}

/// Test that successive runs append to one log file.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_binary_appends_to_the_log_across_runs() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let save_dir = dir.path().join("out");

    Mock::given(method("GET"))
        .and(path("/data/granule.nc"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"data"))
        .mount(&server)
        .await;

    let list_path = write_list(dir.path(), &[format!("{}/data/granule.nc", server.uri())]);

    // Second run skips the now-present file but still logs a summary.
    authed_cmd(dir.path(), &save_dir, &list_path).assert().success();
    authed_cmd(dir.path(), &save_dir, &list_path).assert().success();

    let log = std::fs::read_to_string(dir.path().join("download.log")).unwrap();
    assert_eq!(
        log.matches("run complete").count(),
        2,
        "both runs should be in the log: {log}"
    );
}
