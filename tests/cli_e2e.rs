//! End-to-end tests for the booksearch binary.

#![allow(deprecated)]

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

mod support;
use support::socket_guard::start_mock_server_or_skip;

/// Command isolated from any user config file.
fn booksearch(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("booksearch").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home).env_remove("RUST_LOG");
    cmd
}

fn write_config(config_home: &Path, contents: &str) {
    let dir = config_home.join("booksearch");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), contents).unwrap();
}

#[test]
fn test_binary_help_lists_search_flags() {
    let tempdir = TempDir::new().unwrap();
    booksearch(tempdir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--page-size"))
        .stdout(predicate::str::contains("--order"))
        .stdout(predicate::str::contains("--pages"));
}

#[test]
fn test_binary_version_flag() {
    let tempdir = TempDir::new().unwrap();
    booksearch(tempdir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("booksearch"));
}

#[test]
fn test_binary_rejects_unknown_flag() {
    let tempdir = TempDir::new().unwrap();
    booksearch(tempdir.path())
        .args(["--shelf", "dune"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--shelf"));
}

#[test]
fn test_binary_blank_query_fails_without_network() {
    let tempdir = TempDir::new().unwrap();
    booksearch(tempdir.path())
        .arg("   ")
        .assert()
        .failure()
        .stderr(predicate::str::contains("search text is empty"))
        .stderr(predicate::str::contains("Suggestion:"));
}

#[test]
fn test_binary_invalid_config_reports_path() {
    let tempdir = TempDir::new().unwrap();
    write_config(tempdir.path(), "page_size = 99\n");
    booksearch(tempdir.path())
        .arg("dune")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config.toml"));
}

#[tokio::test]
async fn test_binary_prints_rows_and_summary_from_catalog() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("GET"))
        .and(path("/volumes"))
        .and(query_param("q", "dune"))
        .and(query_param("maxResults", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalItems": 2,
            "items": [
                { "volumeInfo": {
                    "title": "Dune",
                    "authors": ["Frank Herbert"],
                    "publishedDate": "1965",
                    "infoLink": "https://books.example/dune"
                } },
                { "volumeInfo": { "title": "Untraceable" } }
            ]
        })))
        .mount(&mock_server)
        .await;

    let tempdir = TempDir::new().unwrap();
    write_config(
        tempdir.path(),
        &format!("base_url = \"{}/volumes\"\npage_size = 5\n", mock_server.uri()),
    );

    booksearch(tempdir.path())
        .arg("dune")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dune - Frank Herbert (1965)"))
        .stdout(predicate::str::contains("https://books.example/dune"))
        .stdout(predicate::str::contains("Untraceable - (unknown author)"))
        .stdout(predicate::str::contains("[no info page]"))
        .stdout(predicate::str::contains("Showing 2 of 2 results for \"dune\""));
}

#[tokio::test]
async fn test_binary_json_output_and_http_failure_exit_code() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("GET"))
        .and(path("/volumes"))
        .and(query_param("q", "ok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalItems": 1,
            "items": [{ "volumeInfo": { "title": "Solo", "authors": ["A", "B"] } }]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/volumes"))
        .and(query_param("q", "broken"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let tempdir = TempDir::new().unwrap();
    write_config(
        tempdir.path(),
        &format!("base_url = \"{}/volumes\"\n", mock_server.uri()),
    );

    booksearch(tempdir.path())
        .args(["--json", "ok"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\":\"Solo\""))
        .stdout(predicate::str::contains("\"author\":\"A, B\""));

    booksearch(tempdir.path())
        .arg("broken")
        .assert()
        .failure()
        .stderr(predicate::str::contains("HTTP 503"));
}
