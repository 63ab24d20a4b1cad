//! Request block parser.
//!
//! Turns the lines of one block into an [`HttpRequest`]. A block looks like:
//!
//! ```text
//! # :id = 42
//! GET http://$host/items/:id
//! Accept: application/json
//! X-Trace: :id
//! ```
//!
//! Comment lines (starting with `#`) and blank lines are dropped first. The
//! first remaining line is the request line, followed by a contiguous run of
//! header lines; everything after the first non-header line is payload.

pub mod error;
pub mod payload;

use crate::models::{HttpMethod, HttpRequest};
use crate::variables::VariableTable;
use error::ParseError;
use once_cell::sync::Lazy;
use regex::Regex;

pub use payload::{build_payload, classify, parse_attachment};

/// Matches `METHOD url`, with exactly one space after the verb.
static REQUEST_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(GET|POST|DELETE|PUT|HEAD|OPTIONS|PATCH) (.*)$")
        .expect("Failed to compile request line regex")
});

/// Matches `Name: value`. Names exclude the separator characters of the
/// HTTP token grammar.
static HEADER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([^()<>@,;:/\[\]?={}]+):\s*(.*)$").expect("Failed to compile header regex")
});

/// Returns true for lines the parser ignores entirely.
pub fn is_ignored_line(line: &str) -> bool {
    line.starts_with('#') || line.trim().is_empty()
}

/// Parses a request line into its method and unsubstituted URL.
///
/// # Returns
///
/// `Some((method, url))`, or `None` if the line is not `METHOD url`.
pub fn parse_request_line(line: &str) -> Option<(HttpMethod, &str)> {
    let caps = REQUEST_LINE_REGEX.captures(line)?;
    let method = HttpMethod::from_str(caps.get(1)?.as_str())?;
    Some((method, caps.get(2)?.as_str()))
}

/// Parses a header line into its name and unsubstituted value.
///
/// The name is kept exactly as written; leading whitespace of the value is
/// dropped.
pub fn parse_header_line(line: &str) -> Option<(&str, &str)> {
    let caps = HEADER_REGEX.captures(line)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

/// Parses one request block.
///
/// `variables` is applied to the URL, every header value and every payload
/// line. Header names are not substituted.
///
/// # Errors
///
/// - [`ParseError::EmptyBlock`] if only comments and blank lines remain;
/// - [`ParseError::MalformedRequestLine`] if the first remaining line is not `METHOD url`;
/// - [`ParseError::InvalidJsonBody`] if the request declares `application/json`
///   and the body does not parse.
///
/// # Examples
///
/// ```
/// use http_block::models::HttpMethod;
/// use http_block::parser::parse_block;
/// use http_block::variables::VariableTable;
///
/// let mut variables = VariableTable::new();
/// variables.insert(":a", "barf");
///
/// let block = ["# :a=barf", "GET http://example.test/headers", "X-Hey: :a"];
/// let request = parse_block(&block, &variables).unwrap();
///
/// assert_eq!(request.method, HttpMethod::GET);
/// assert_eq!(request.url, "http://example.test/headers");
/// assert_eq!(request.headers["X-Hey"], "barf");
/// ```
pub fn parse_block<S: AsRef<str>>(
    block_lines: &[S],
    variables: &VariableTable,
) -> Result<HttpRequest, ParseError> {
    let mut lines = block_lines
        .iter()
        .map(|line| line.as_ref())
        .filter(|line| !is_ignored_line(line))
        .peekable();

    let request_line = lines.next().ok_or(ParseError::EmptyBlock)?;
    let (method, raw_url) =
        parse_request_line(request_line).ok_or_else(|| ParseError::MalformedRequestLine {
            line: request_line.to_string(),
        })?;

    let url = variables.substitute(raw_url).trim().to_string();
    let mut request = HttpRequest::new(method, url);

    while let Some((name, value)) = lines.peek().and_then(|line| parse_header_line(*line)) {
        request.add_header(name.to_string(), variables.substitute(value));
        lines.next();
    }

    let body_lines: Vec<String> = lines.map(|line| variables.substitute(line)).collect();
    request.payload = build_payload(&body_lines, request.declares_json())?;

    log::debug!(
        "Parsed {} {} with {} header(s) and {} body line(s)",
        request.method,
        request.url,
        request.headers.len(),
        body_lines.len()
    );

    Ok(request)
}
