//! JSON pretty-printing for response bodies.
//!
//! Output is deterministic: object keys are sorted, nesting is indented by two
//! spaces and keys are separated from values by `": "`. Non-ASCII characters
//! are either written as-is or escaped as `\uXXXX`.

use crate::formatter::FormatError;
use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use serde_json::{Map, Value};
use std::io;

const INDENT: &[u8] = b"  ";

/// Formats JSON with sorted keys and 2-space indentation.
///
/// # Arguments
///
/// * `json` - JSON text to format
/// * `escape_unicode` - escape every non-ASCII character as `\uXXXX`
///
/// # Returns
///
/// `Ok(String)` with the formatted JSON, or `Err(FormatError)` if the text
/// does not parse.
///
/// # Examples
///
/// ```
/// use http_block::formatter::json::format_json_pretty;
///
/// let formatted = format_json_pretty(r#"{"b":1,"a":"é"}"#, false).unwrap();
/// assert_eq!(formatted, "{\n  \"a\": \"é\",\n  \"b\": 1\n}");
///
/// let escaped = format_json_pretty(r#"{"a":"é"}"#, true).unwrap();
/// assert_eq!(escaped, "{\n  \"a\": \"\\u00e9\"\n}");
/// ```
pub fn format_json_pretty(json: &str, escape_unicode: bool) -> Result<String, FormatError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| FormatError::JsonError(e.to_string()))?;
    let value = sort_keys(value);

    let mut buf = Vec::with_capacity(json.len() + json.len() / 2);
    let pretty = PrettyFormatter::with_indent(INDENT);

    if escape_unicode {
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, AsciiFormatter { inner: pretty });
        value
            .serialize(&mut serializer)
            .map_err(|e| FormatError::JsonError(e.to_string()))?;
    } else {
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, pretty);
        value
            .serialize(&mut serializer)
            .map_err(|e| FormatError::JsonError(e.to_string()))?;
    }

    String::from_utf8(buf).map_err(|e| FormatError::EncodingError(e.to_string()))
}

/// Recursively rebuilds every object with its keys in sorted order.
///
/// The order of `serde_json::Map` depends on crate features, so the keys are
/// sorted explicitly.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));

            let mut sorted = Map::new();
            for (key, value) in entries {
                sorted.insert(key, sort_keys(value));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// Pretty formatter that escapes all non-ASCII characters.
///
/// Characters outside the Basic Multilingual Plane are written as a UTF-16
/// surrogate pair.
struct AsciiFormatter<'a> {
    inner: PrettyFormatter<'a>,
}

impl<'a> Formatter for AsciiFormatter<'a> {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut ascii_start = 0;

        for (index, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }

            writer.write_all(fragment[ascii_start..index].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            ascii_start = index + ch.len_utf8();
        }

        writer.write_all(fragment[ascii_start..].as_bytes())
    }
}
