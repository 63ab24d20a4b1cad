//! End-to-end integration tests
//!
//! These tests drive `send_request` from document text to presented output
//! against a local mock server.

use super::document;
use http_block::commands::{send_request, CommandError};
use http_block::config::{load_config, HttpBlockConfig};
use http_block::host::BufferPresenter;
use http_block::parser::error::ParseError;
use mockito::Matcher;
use serial_test::serial;
use std::fs;

fn config() -> HttpBlockConfig {
    HttpBlockConfig::default()
}

fn body_of(lines: &[String]) -> Vec<&str> {
    let end = lines
        .iter()
        .position(|line| line.starts_with("// Status Code:"))
        .expect("status line present");
    // The body is followed by one blank separator line.
    lines[..end - 1].iter().map(String::as_str).collect()
}

#[test]
fn test_local_variable_in_header() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/headers")
        .match_header("x-hey", "barf")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"headers":{"X-Hey":"barf"}}"#)
        .create();

    let url = format!("GET {}/headers", server.url());
    let source = document(&["# comment", "# :a=barf", &url, "X-Hey: :a", "# comment"], 2);
    let mut presenter = BufferPresenter::new();

    let rendered = send_request(&source, &mut presenter, &config()).unwrap();

    mock.assert();
    assert_eq!(rendered.content_type, "application/json");
    assert_eq!(
        body_of(presenter.lines()),
        vec!["{", "  \"headers\": {", "    \"X-Hey\": \"barf\"", "  }", "}"]
    );
    assert!(presenter
        .lines()
        .contains(&"// Status Code: 200".to_string()));
    assert!(presenter.lines().contains(&"-----".to_string()));
}

#[test]
fn test_global_variable_declared_after_block() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/post")
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("forma".into(), "a".into()),
            Matcher::UrlEncoded("formb".into(), "b".into()),
        ]))
        .with_status(200)
        .with_body("ok")
        .create();

    let declaration = format!("# $h = {}", server.host_with_port());
    let source = document(
        &["POST http://$h/post", "forma=a", "formb=b", "", &declaration],
        0,
    );
    let mut presenter = BufferPresenter::new();

    send_request(&source, &mut presenter, &config()).unwrap();

    mock.assert();
    assert_eq!(body_of(presenter.lines()), vec!["ok"]);
}

#[test]
fn test_multipart_upload_from_file_and_inline_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.txt");
    fs::write(&path, "contents of the sample file").unwrap();

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/upload")
        .match_header("content-type", Matcher::Regex("^multipart/form-data".into()))
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="forma""#.into()),
            Matcher::Regex(r#"name="formc"; filename="sample.txt""#.into()),
            Matcher::Regex("contents of the sample file".into()),
            Matcher::Regex(r#"name="formd"; filename="formd""#.into()),
            Matcher::Regex(r"foo \(bar\)".into()),
        ]))
        .with_status(201)
        .create();

    let url = format!("POST {}/upload", server.url());
    let file_line = format!("formc=!file({})", path.display());
    let source = document(
        &[&url, "forma=a", &file_line, r"formd=!content(foo \(bar\))"],
        0,
    );
    let mut presenter = BufferPresenter::new();

    send_request(&source, &mut presenter, &config()).unwrap();

    mock.assert();
    assert!(presenter
        .lines()
        .contains(&"// Status Code: 201".to_string()));
}

#[test]
fn test_json_body_is_sent_as_json() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/users")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(serde_json::json!({
            "name": "John",
            "roles": ["admin"]
        })))
        .with_status(201)
        .create();

    let url = format!("POST {}/users", server.url());
    let source = document(
        &[
            &url,
            "Content-Type: application/json",
            "{",
            r#"  "name": ":name","#,
            r#"  "roles": ["admin"]"#,
            "}",
            "# :name = John",
        ],
        0,
    );
    let mut presenter = BufferPresenter::new();

    send_request(&source, &mut presenter, &config()).unwrap();
    mock.assert();
}

#[test]
fn test_json_body_with_equals_is_sent_as_json() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/search")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(serde_json::json!({"filter": "status=open"})))
        .with_status(200)
        .with_body("found")
        .create();

    let url = format!("POST {}/search", server.url());
    let source = document(
        &[&url, "Content-Type: application/json", r#"{"filter": "status=open"}"#],
        0,
    );
    let mut presenter = BufferPresenter::new();

    send_request(&source, &mut presenter, &config()).unwrap();

    mock.assert();
    assert_eq!(body_of(presenter.lines()), vec!["found"]);
}

#[test]
fn test_invalid_json_body_sends_nothing() {
    let mut server = mockito::Server::new();
    let mock = server.mock("POST", Matcher::Any).expect(0).create();

    let url = format!("POST {}/users", server.url());
    let source = document(&[&url, "Content-Type: application/json", "{oops"], 0);
    let mut presenter = BufferPresenter::new();

    let err = send_request(&source, &mut presenter, &config()).unwrap_err();

    mock.assert();
    assert!(matches!(
        err,
        CommandError::Parse(ParseError::InvalidJsonBody { .. })
    ));
    assert_eq!(presenter.errors().len(), 1);
    assert!(presenter.lines().is_empty());
}

#[test]
fn test_comment_only_block_sends_nothing() {
    let mut server = mockito::Server::new();
    let mock = server.mock("GET", Matcher::Any).expect(0).create();

    let url = format!("GET {}/", server.url());
    let source = document(&["# :a = 1", "# nothing else", "", &url], 0);
    let mut presenter = BufferPresenter::new();

    let err = send_request(&source, &mut presenter, &config()).unwrap_err();

    mock.assert();
    assert!(matches!(err, CommandError::Parse(ParseError::EmptyBlock)));
    assert_eq!(presenter.errors(), &["Request was empty.".to_string()][..]);
}

#[test]
#[serial]
fn test_preserved_responses_stack_newest_first() {
    let mut server = mockito::Server::new();
    let _first = server.mock("GET", "/first").with_body("first body").create();
    let _second = server.mock("GET", "/second").with_body("second body").create();

    let config = load_config(Some(serde_json::json!({
        "http-block": { "preserveResponses": true }
    })))
    .unwrap();

    let first = format!("GET {}/first", server.url());
    let second = format!("GET {}/second", server.url());
    let mut presenter = BufferPresenter::new();

    send_request(&document(&[&first, "", &second], 0), &mut presenter, &config).unwrap();
    let first_len = presenter.lines().len();
    send_request(&document(&[&first, "", &second], 2), &mut presenter, &config).unwrap();

    let lines = presenter.lines();
    assert_eq!(lines[0], "second body");
    assert_eq!(lines.len(), first_len * 2 + 1);
    assert_eq!(lines[first_len], "");
    assert_eq!(lines[first_len + 1], "first body");

    http_block::config::reset_config();
}

#[test]
fn test_escape_unicode_setting() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/greeting")
        .with_header("content-type", "application/json; charset=utf-8")
        .with_body(r#"{"greeting":"héllo"}"#)
        .create();

    let url = format!("GET {}/greeting", server.url());
    let config = HttpBlockConfig {
        json_escape_unicode: true,
        ..HttpBlockConfig::default()
    };
    let mut presenter = BufferPresenter::new();

    send_request(&document(&[&url], 0), &mut presenter, &config).unwrap();

    assert_eq!(presenter.lines()[1], r#"  "greeting": "h\u00e9llo""#);
}

#[test]
fn test_non_json_response_keeps_server_content_type() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/page")
        .with_status(503)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body("<h1>down</h1>\n<p>later</p>")
        .create();

    let url = format!("GET {}/page", server.url());
    let mut presenter = BufferPresenter::new();

    let rendered = send_request(&document(&[&url], 0), &mut presenter, &config()).unwrap();

    assert_eq!(rendered.content_type, "text/html");
    assert_eq!(presenter.display_mode(), Some("html"));
    assert_eq!(body_of(presenter.lines()), vec!["<h1>down</h1>", "<p>later</p>"]);
    assert!(presenter
        .lines()
        .contains(&"// Status Code: 503".to_string()));
}
