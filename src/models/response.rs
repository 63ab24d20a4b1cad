//! HTTP response data models.
//!
//! This module defines the captured outcome of one executed request: status,
//! headers in the order the server sent them, the decoded body text and the
//! wall-clock timing of the exchange.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Wall-clock timing of a single request.
///
/// `start` is taken right before the request is sent and `end` right after
/// the body has been read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestTiming {
    /// When the request was sent.
    pub start: DateTime<Local>,

    /// When the response body was fully read.
    pub end: DateTime<Local>,

    /// Elapsed monotonic time between the two.
    pub duration: Duration,
}

impl RequestTiming {
    /// Creates a zero-length timing anchored at the current instant.
    pub fn new() -> Self {
        let now = Local::now();
        Self {
            start: now,
            end: now,
            duration: Duration::from_secs(0),
        }
    }

    /// Formats a timestamp as ISO-8601 with microsecond precision.
    pub fn format_timestamp(timestamp: &DateTime<Local>) -> String {
        timestamp.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }

    /// Returns the duration in seconds with its full fractional part.
    pub fn duration_secs(&self) -> f64 {
        self.duration.as_secs_f64()
    }
}

impl Default for RequestTiming {
    fn default() -> Self {
        Self::new()
    }
}

/// Represents an HTTP response received from a server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpResponse {
    /// HTTP status code (e.g., 200, 404, 500).
    pub status_code: u16,

    /// Response headers in the order received.
    ///
    /// Kept as a list so repeated headers such as `Set-Cookie` are all shown.
    pub headers: Vec<(String, String)>,

    /// Response body decoded as text.
    pub body: String,

    /// Timing of the exchange.
    pub timing: RequestTiming,
}

impl HttpResponse {
    /// Creates a new HttpResponse with the given status code.
    pub fn new(status_code: u16) -> Self {
        Self {
            status_code,
            headers: Vec::new(),
            body: String::new(),
            timing: RequestTiming::new(),
        }
    }

    /// Gets the raw Content-Type header value if present.
    ///
    /// The header name is matched case-insensitively; the first occurrence wins.
    pub fn content_type_header(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.as_str())
    }

    /// Gets the media type with any `;` parameters stripped.
    ///
    /// Returns an empty string when the server sent no Content-Type.
    pub fn content_type(&self) -> String {
        self.content_type_header()
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_string())
            .unwrap_or_default()
    }

    /// Adds a header to the response.
    pub fn add_header(&mut self, name: String, value: String) {
        self.headers.push((name, value));
    }

    /// Sets the response body.
    pub fn set_body(&mut self, body: String) {
        self.body = body;
    }
}
