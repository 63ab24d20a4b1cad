//! Payload classification.
//!
//! The lines left after the header section are either a raw body or, when
//! every one of them has a `=`, a form. Form values written as
//! `!file(<path>)` or `!content(<literal>)` become attachments.

use super::error::ParseError;
use crate::models::{Attachment, FormData, Payload};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;

/// Matches an attachment reference at the start of a form value.
///
/// The argument runs to the last `)` on the line, so escaped parentheses
/// inside it do not end it early.
static ATTACHMENT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^!(file|content)\((.+)\)").expect("Failed to compile attachment regex")
});

/// Parses a form value as an attachment reference.
///
/// `\(` and `\)` inside the argument are unescaped to `(` and `)`.
///
/// # Returns
///
/// `Some(Attachment)` if the value references a file or inline content,
/// `None` for a plain field value.
///
/// # Examples
///
/// ```
/// use http_block::models::Attachment;
/// use http_block::parser::payload::parse_attachment;
///
/// assert_eq!(
///     parse_attachment(r"!content(foo \(bar\))"),
///     Some(Attachment::Inline(b"foo (bar)".to_vec()))
/// );
/// assert_eq!(parse_attachment("plain"), None);
/// ```
pub fn parse_attachment(value: &str) -> Option<Attachment> {
    let caps = ATTACHMENT_REGEX.captures(value)?;
    let argument = caps[2].replace("\\(", "(").replace("\\)", ")");

    match &caps[1] {
        "file" => Some(Attachment::File(PathBuf::from(argument))),
        _ => Some(Attachment::Inline(argument.into_bytes())),
    }
}

/// Classifies body lines into a raw body or a form.
///
/// - no lines: an empty raw body;
/// - every line contains `=`: a form, split at the first `=` of each line;
/// - otherwise: the lines joined with `\n`.
///
/// A key written twice keeps its first position and its last value.
pub fn classify<S: AsRef<str>>(lines: &[S]) -> Payload {
    if lines.is_empty() {
        return Payload::Raw(String::new());
    }

    let is_form = lines.iter().all(|line| line.as_ref().contains('='));
    if !is_form {
        let body = lines
            .iter()
            .map(|line| line.as_ref())
            .collect::<Vec<_>>()
            .join("\n");
        return Payload::Raw(body);
    }

    let mut pairs: IndexMap<String, String> = IndexMap::new();
    for line in lines {
        if let Some((key, value)) = line.as_ref().split_once('=') {
            pairs.insert(key.to_string(), value.to_string());
        }
    }

    let mut form = FormData::default();
    for (key, value) in pairs {
        match parse_attachment(&value) {
            Some(attachment) => {
                form.attachments.insert(key, attachment);
            }
            None => {
                form.fields.insert(key, value);
            }
        }
    }

    log::debug!(
        "Classified body as form: {} field(s), {} attachment(s)",
        form.fields.len(),
        form.attachments.len()
    );
    Payload::Form(form)
}

/// Classifies body lines and applies the JSON body rule.
///
/// When `declares_json` is set, form classification is skipped: the lines
/// are joined and parsed into [`Payload::Json`]. An empty body stays an
/// empty raw body.
///
/// # Errors
///
/// [`ParseError::InvalidJsonBody`] if a JSON body does not parse.
pub fn build_payload<S: AsRef<str>>(lines: &[S], declares_json: bool) -> Result<Payload, ParseError> {
    if !declares_json {
        return Ok(classify(lines));
    }

    let body = lines
        .iter()
        .map(|line| line.as_ref())
        .collect::<Vec<_>>()
        .join("\n");
    if body.is_empty() {
        return Ok(Payload::Raw(body));
    }

    let value: serde_json::Value = serde_json::from_str(&body)?;
    Ok(Payload::Json(value))
}
