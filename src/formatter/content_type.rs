//! Content type detection.
//!
//! The renderer only cares about the media type of a response (the part of
//! the `Content-Type` header before any `;` parameters) and whether that media
//! type names JSON.

use crate::models::HttpResponse;
use once_cell::sync::Lazy;
use regex::Regex;

/// Media type reported for a body that was re-serialized as JSON.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Matches media types whose body is pretty-printed as JSON.
///
/// Covers `application/json`, `application/problem+json`, `text/javascript`
/// and the like.
static JSON_TYPE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(javascript|json)$").expect("Failed to compile JSON content type regex")
});

/// Returns the effective content type of a response.
///
/// The `Content-Type` header is looked up case-insensitively and reduced to
/// the text before the first `;`, trimmed. An absent header yields `""`.
///
/// # Examples
///
/// ```
/// use http_block::formatter::content_type::effective_content_type;
/// use http_block::models::HttpResponse;
///
/// let mut response = HttpResponse::new(200);
/// response.add_header("Content-Type".to_string(), "text/html; charset=utf-8".to_string());
///
/// assert_eq!(effective_content_type(&response), "text/html");
/// ```
pub fn effective_content_type(response: &HttpResponse) -> String {
    response.content_type()
}

/// Checks whether a media type is rendered as JSON.
pub fn is_json_content_type(content_type: &str) -> bool {
    JSON_TYPE_REGEX.is_match(content_type)
}
