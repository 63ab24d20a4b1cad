//! HTTP response renderer.
//!
//! Turns an [`HttpResponse`] into the lines shown to the user: the body
//! (pretty-printed when it is JSON), followed by a trailer of `//` comment
//! lines with the status, the response headers and the request timing.
//!
//! ```text
//! {
//!   "ok": true
//! }
//!
//! // Status Code: 200
//! // content-type: application/json
//! -----
//! // Request Start Date: 2024-05-01T10:15:30.123456
//! // Request End Date: 2024-05-01T10:15:30.456789
//! // Request Duration: 0.333333 Seconds
//! ```

pub mod content_type;
pub mod json;

pub use content_type::{effective_content_type, is_json_content_type, JSON_CONTENT_TYPE};
pub use json::format_json_pretty;

use crate::models::{HttpResponse, RequestTiming};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors that can occur during response formatting.
///
/// These never reach the user: the renderer falls back to the raw body.
#[derive(Debug)]
pub enum FormatError {
    /// JSON parsing or formatting error.
    JsonError(String),

    /// UTF-8 encoding error.
    EncodingError(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::JsonError(msg) => write!(f, "JSON formatting error: {}", msg),
            FormatError::EncodingError(msg) => write!(f, "Encoding error: {}", msg),
        }
    }
}

impl std::error::Error for FormatError {}

/// Options that affect how a response is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Escape non-ASCII characters in pretty-printed JSON.
    pub escape_unicode: bool,
}

/// A rendered response ready for the presenter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedResponse {
    /// Output lines, without trailing newlines.
    pub lines: Vec<String>,

    /// Effective content type, used to pick a display mode.
    ///
    /// `application/json` whenever the body was re-serialized as JSON.
    pub content_type: String,
}

/// Renders a response into output lines.
///
/// # Arguments
///
/// * `response` - The response to render
/// * `options` - Rendering options
///
/// # Returns
///
/// The rendered lines and the effective content type. If the content type
/// names JSON but the body does not parse, the body is shown unchanged and
/// the content type is left as the server sent it.
///
/// # Examples
///
/// ```
/// use http_block::formatter::{render, RenderOptions};
/// use http_block::models::HttpResponse;
///
/// let mut response = HttpResponse::new(200);
/// response.add_header("Content-Type".to_string(), "application/json".to_string());
/// response.set_body(r#"{"b":2,"a":1}"#.to_string());
///
/// let rendered = render(&response, &RenderOptions::default());
///
/// assert_eq!(rendered.content_type, "application/json");
/// assert_eq!(&rendered.lines[..4], &["{", "  \"a\": 1,", "  \"b\": 2", "}"]);
/// assert_eq!(rendered.lines[5], "// Status Code: 200");
/// ```
pub fn render(response: &HttpResponse, options: &RenderOptions) -> RenderedResponse {
    let mut content_type = effective_content_type(response);
    let mut body = response.body.clone();

    if is_json_content_type(&content_type) {
        match format_json_pretty(&response.body, options.escape_unicode) {
            Ok(formatted) => {
                body = formatted;
                content_type = JSON_CONTENT_TYPE.to_string();
            }
            Err(e) => log::debug!("Showing raw body: {}", e),
        }
    }

    let mut lines: Vec<String> = body.split('\n').map(str::to_string).collect();
    lines.push(String::new());
    lines.extend(format_trailer(response));

    RenderedResponse {
        lines,
        content_type,
    }
}

/// Formats the metadata lines that follow the body.
fn format_trailer(response: &HttpResponse) -> Vec<String> {
    let mut trailer = Vec::with_capacity(response.headers.len() + 5);

    trailer.push(format!("// Status Code: {}", response.status_code));
    for (name, value) in &response.headers {
        trailer.push(format!("// {}: {}", name, value));
    }
    trailer.push("-----".to_string());
    trailer.extend(format_timing(&response.timing));

    trailer
}

fn format_timing(timing: &RequestTiming) -> [String; 3] {
    [
        format!(
            "// Request Start Date: {}",
            RequestTiming::format_timestamp(&timing.start)
        ),
        format!(
            "// Request End Date: {}",
            RequestTiming::format_timestamp(&timing.end)
        ),
        format!("// Request Duration: {} Seconds", timing.duration_secs()),
    ]
}
