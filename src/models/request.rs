//! HTTP request data models.
//!
//! This module defines the structured description of one request block: the
//! method, the substituted URL, the ordered headers and the payload that the
//! block's remaining lines were classified into.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// HTTP request method.
///
/// Only the verbs a request line may start with are represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    /// HTTP GET method - retrieve a resource
    GET,
    /// HTTP POST method - submit data to create a resource
    POST,
    /// HTTP DELETE method - remove a resource
    DELETE,
    /// HTTP PUT method - replace a resource
    PUT,
    /// HTTP HEAD method - retrieve headers only
    HEAD,
    /// HTTP OPTIONS method - describe communication options
    OPTIONS,
    /// HTTP PATCH method - partially modify a resource
    PATCH,
}

impl HttpMethod {
    /// Returns the string representation of the HTTP method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::PUT => "PUT",
            HttpMethod::HEAD => "HEAD",
            HttpMethod::OPTIONS => "OPTIONS",
            HttpMethod::PATCH => "PATCH",
        }
    }

    /// Parses a request-line verb into an HttpMethod.
    ///
    /// Matching is exact: request lines are case-sensitive, so `get` is not
    /// a method.
    ///
    /// # Returns
    ///
    /// `Some(HttpMethod)` if the string is a supported verb, `None` otherwise.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(HttpMethod::GET),
            "POST" => Some(HttpMethod::POST),
            "DELETE" => Some(HttpMethod::DELETE),
            "PUT" => Some(HttpMethod::PUT),
            "HEAD" => Some(HttpMethod::HEAD),
            "OPTIONS" => Some(HttpMethod::OPTIONS),
            "PATCH" => Some(HttpMethod::PATCH),
            _ => None,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A form value supplied as bytes rather than as a literal string field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Attachment {
    /// Bytes read from a file on disk, written as `!file(<path>)`.
    File(PathBuf),

    /// Bytes given inline in the block, written as `!content(<literal>)`.
    Inline(Vec<u8>),
}

/// Key/value form submission.
///
/// `fields` and `attachments` never share a key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormData {
    /// Literal string fields, in declaration order.
    pub fields: IndexMap<String, String>,

    /// Fields whose value is file or inline bytes, in declaration order.
    pub attachments: IndexMap<String, Attachment>,
}

impl FormData {
    /// Returns true if the form carries at least one attachment and must be
    /// sent as multipart.
    pub fn is_multipart(&self) -> bool {
        !self.attachments.is_empty()
    }
}

/// What the lines after the header section were classified into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Payload {
    /// Body lines joined with `\n`, sent verbatim.
    Raw(String),

    /// A raw body parsed as JSON because the request declared a JSON content type.
    Json(serde_json::Value),

    /// Form fields and attachments.
    Form(FormData),
}

impl Payload {
    /// Returns true if nothing would be sent as a request body.
    pub fn is_empty(&self) -> bool {
        match self {
            Payload::Raw(body) => body.is_empty(),
            Payload::Json(_) => false,
            Payload::Form(form) => form.fields.is_empty() && form.attachments.is_empty(),
        }
    }
}

impl Default for Payload {
    fn default() -> Self {
        Payload::Raw(String::new())
    }
}

/// Represents an HTTP request parsed from a request block.
///
/// The URL, header values and payload have already had variables
/// substituted; nothing here refers back to the source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: HttpMethod,

    /// Target URL, substituted and trimmed.
    pub url: String,

    /// Request headers in the order they were written.
    ///
    /// Names keep the case they were written with. A repeated name replaces
    /// the earlier value in place.
    pub headers: IndexMap<String, String>,

    /// Request payload.
    pub payload: Payload,
}

impl HttpRequest {
    /// Creates a new HttpRequest with no headers and an empty body.
    pub fn new(method: HttpMethod, url: String) -> Self {
        Self {
            method,
            url,
            headers: IndexMap::new(),
            payload: Payload::default(),
        }
    }

    /// Adds a header to the request.
    pub fn add_header(&mut self, name: String, value: String) {
        self.headers.insert(name, value);
    }

    /// Gets the Content-Type header value if present.
    ///
    /// The header name is matched case-insensitively.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if the request declares `application/json` as its content type.
    ///
    /// Media type parameters such as `charset` are ignored.
    pub fn declares_json(&self) -> bool {
        self.content_type()
            .map(|ct| {
                ct.split(';')
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .eq_ignore_ascii_case("application/json")
            })
            .unwrap_or(false)
    }
}
