// End-to-end tests of the rowhook binary: selection persistence via a
// scratch XDG_CONFIG_HOME, webhook traffic via httpmock.
//
// Every command runs with a cleared environment so the host's ROWHOOK_*
// variables can't leak in.

use std::path::Path;
use std::process::Command;

use httpmock::prelude::*;
use serde_json::json;

const DOC_CONFIG: &str = "Sales:Q1[name],Q2;HR:Roster[id]";

fn rowhook(config_home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_rowhook"));
    cmd.env_clear()
        .env("XDG_CONFIG_HOME", config_home)
        .env("ROWHOOK_DOC_SHEET_CONFIG", DOC_CONFIG);
    cmd
}

/// Point the localhost domain at a mock server, with short webhook
/// names so the paths are predictable.
fn with_mock_domain<'a>(cmd: &'a mut Command, server: &MockServer) -> &'a mut Command {
    cmd.env("ROWHOOK_LOCALHOST", "127.0.0.1")
        .env("ROWHOOK_PORT", server.port().to_string())
        .env("ROWHOOK_FETCH_WEBHOOK", "fetch")
        .env("ROWHOOK_UPDATE_WEBHOOK", "update")
        .env("ROWHOOK_DELETE_WEBHOOK", "delete")
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn select(config_home: &Path, document: &str, sheet: &str) {
    let out = rowhook(config_home)
        .args(["use", document, sheet])
        .output()
        .expect("rowhook use");
    assert!(out.status.success(), "use failed: {}", stderr(&out));
}

#[test]
fn docs_lists_configured_documents() {
    let tmp = tempfile::tempdir().unwrap();
    let out = rowhook(tmp.path()).arg("docs").output().unwrap();
    assert!(out.status.success());
    assert_eq!(stdout(&out), "Sales\nHR\n");
}

#[test]
fn docs_without_config_is_a_usage_error() {
    let tmp = tempfile::tempdir().unwrap();
    let out = rowhook(tmp.path())
        .env("ROWHOOK_DOC_SHEET_CONFIG", "")
        .arg("docs")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("no documents configured"));
}

#[test]
fn sheets_strip_match_column_hints() {
    let tmp = tempfile::tempdir().unwrap();
    let out = rowhook(tmp.path()).args(["sheets", "Sales"]).output().unwrap();
    assert!(out.status.success());
    assert_eq!(stdout(&out), "Q1\nQ2\n");
}

#[test]
fn status_without_domains_exits_with_config_code() {
    let tmp = tempfile::tempdir().unwrap();
    let out = rowhook(tmp.path()).arg("status").output().unwrap();
    assert_eq!(out.status.code(), Some(10));
    assert!(stderr(&out).contains("ROWHOOK_LOCALHOST"));
}

#[test]
fn selection_persists_and_back_steps_out() {
    let tmp = tempfile::tempdir().unwrap();
    let server = MockServer::start();
    select(tmp.path(), "Sales", "Q1");

    let out = with_mock_domain(&mut rowhook(tmp.path()), &server)
        .arg("status")
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("document: Sales"));
    assert!(text.contains("sheet:    Q1"));
    assert!(text.contains(&format!(
        "http://127.0.0.1:{}/webhook/fetch",
        server.port()
    )));

    // Back one level: sheet gone, document kept.
    let out = rowhook(tmp.path()).arg("back").output().unwrap();
    assert!(out.status.success());
    let out = with_mock_domain(&mut rowhook(tmp.path()), &server)
        .arg("status")
        .output()
        .unwrap();
    let text = stdout(&out);
    assert!(text.contains("document: Sales"));
    assert!(text.contains("sheet:    -"));

    // Back home: nothing selected.
    let out = rowhook(tmp.path()).args(["back", "--home"]).output().unwrap();
    assert!(out.status.success());
    let out = with_mock_domain(&mut rowhook(tmp.path()), &server)
        .arg("status")
        .output()
        .unwrap();
    assert!(stdout(&out).contains("document: -"));
}

#[test]
fn use_rejects_unknown_sheets() {
    let tmp = tempfile::tempdir().unwrap();
    let out = rowhook(tmp.path()).args(["use", "Sales", "Q9"]).output().unwrap();
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("no sheet 'Q9'"));
}

#[test]
fn fetch_renders_a_table_and_supports_json() {
    let tmp = tempfile::tempdir().unwrap();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST)
            .path("/webhook/fetch")
            .json_body(json!({"doc": "Sales", "sheet": "Q1"}));
        then.status(200).json_body(json!([
            {"row_number": 1, "name": "Ann", "amount": 10},
            {"row_number": 2, "name": "Bob", "amount": 20},
        ]));
    });
    select(tmp.path(), "Sales", "Q1");

    let out = with_mock_domain(&mut rowhook(tmp.path()), &server)
        .arg("fetch")
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("Sales / Q1"));
    assert!(text.contains("Ann"));
    assert!(text.contains("Bob"));

    let out = with_mock_domain(&mut rowhook(tmp.path()), &server)
        .args(["fetch", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let rows: serde_json::Value = serde_json::from_str(stdout(&out).trim()).unwrap();
    assert_eq!(rows.as_array().map(Vec::len), Some(2));
}

#[test]
fn fetch_search_filters_rows() {
    let tmp = tempfile::tempdir().unwrap();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/webhook/fetch");
        then.status(200).json_body(json!([
            {"row_number": 1, "name": "Ann"},
            {"row_number": 2, "name": "Bob"},
        ]));
    });
    select(tmp.path(), "Sales", "Q1");

    let out = with_mock_domain(&mut rowhook(tmp.path()), &server)
        .args(["fetch", "--search", "ann"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("found 1 of 2 rows"));
    assert!(text.contains("Ann"));
    assert!(!text.contains("Bob"));
}

#[test]
fn fetch_without_selection_is_a_usage_error() {
    let tmp = tempfile::tempdir().unwrap();
    let server = MockServer::start();
    let out = with_mock_domain(&mut rowhook(tmp.path()), &server)
        .arg("fetch")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("no sheet selected"));
}

#[test]
fn fetch_exhaustion_reports_tried_urls() {
    let tmp = tempfile::tempdir().unwrap();
    select(tmp.path(), "Sales", "Q1");

    // Port 9 is unassigned: connection refused, no fallback available.
    let out = rowhook(tmp.path())
        .env("ROWHOOK_LOCALHOST", "127.0.0.1")
        .env("ROWHOOK_PORT", "9")
        .arg("fetch")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(50));
    let text = stderr(&out);
    assert!(text.contains("tried:"));
    assert!(text.contains("http://127.0.0.1:9/webhook/"));
}

#[test]
fn update_pushes_edited_columns() {
    let tmp = tempfile::tempdir().unwrap();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/webhook/fetch");
        then.status(200).json_body(json!([
            {"row_number": 1, "name": "Ann", "amount": 10},
        ]));
    });
    let update_mock = server.mock(|when, then| {
        when.method(POST).path("/webhook/update").json_body(json!({
            "doc": "Sales",
            "sheet": "Q1",
            "rowIndex": 1,
            "name": "Annie",
            "amount": 10,
        }));
        then.status(200).body("ok");
    });
    select(tmp.path(), "Sales", "Q1");

    let out = with_mock_domain(&mut rowhook(tmp.path()), &server)
        .args(["update", "1", "--set", "name=Annie"])
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", stderr(&out));
    assert!(stdout(&out).contains("row #1 updated"));
    update_mock.assert_hits(1);
}

#[test]
fn delete_requires_confirmation() {
    let tmp = tempfile::tempdir().unwrap();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/webhook/fetch");
        then.status(200).json_body(json!([{"row_number": 3, "name": "Cara"}]));
    });
    let delete_mock = server.mock(|when, then| {
        when.method(POST).path("/webhook/delete").json_body(json!({
            "doc": "Sales",
            "sheet": "Q1",
            "row_number": 3,
        }));
        then.status(200).body("ok");
    });
    select(tmp.path(), "Sales", "Q1");

    let out = with_mock_domain(&mut rowhook(tmp.path()), &server)
        .args(["delete", "3"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(2));
    delete_mock.assert_hits(0);

    let out = with_mock_domain(&mut rowhook(tmp.path()), &server)
        .args(["delete", "3", "--yes"])
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", stderr(&out));
    assert!(stdout(&out).contains("row #3 deleted"));
    delete_mock.assert_hits(1);
}

#[test]
fn unknown_row_is_a_usage_error() {
    let tmp = tempfile::tempdir().unwrap();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/webhook/fetch");
        then.status(200).json_body(json!([{"row_number": 1}]));
    });
    select(tmp.path(), "Sales", "Q1");

    let out = with_mock_domain(&mut rowhook(tmp.path()), &server)
        .args(["update", "99", "--set", "name=x"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("row 99 not found"));
}
