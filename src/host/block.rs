//! Locating the request block under the cursor.

use super::BlockSource;

fn is_block_boundary(line: &str) -> bool {
    line.trim().is_empty()
}

/// Returns the block containing `line_index`.
///
/// Scans upward and downward from `line_index` to the nearest blank line on
/// each side. The blank boundary lines are part of the result; the parser
/// ignores them. An index past the end is clamped to the last line.
///
/// # Examples
///
/// ```
/// use http_block::host::find_block;
///
/// let document = ["GET http://a.test", "", "# :x = 1", "GET http://b.test/:x", "", "tail"];
/// assert_eq!(find_block(&document, 3), vec!["", "# :x = 1", "GET http://b.test/:x", ""]);
/// assert_eq!(find_block(&document, 0), vec!["GET http://a.test", ""]);
/// ```
pub fn find_block<S: AsRef<str>>(lines: &[S], line_index: usize) -> Vec<String> {
    if lines.is_empty() {
        return Vec::new();
    }

    let cursor = line_index.min(lines.len() - 1);

    let mut start = cursor;
    while start > 0 && !is_block_boundary(lines[start].as_ref()) {
        start -= 1;
    }

    let mut end = cursor;
    while end + 1 < lines.len() && !is_block_boundary(lines[end].as_ref()) {
        end += 1;
    }

    lines[start..=end]
        .iter()
        .map(|line| line.as_ref().to_string())
        .collect()
}

/// An in-memory document with a cursor line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSource {
    lines: Vec<String>,
    cursor: usize,
}

impl DocumentSource {
    /// Creates a source from document lines and a 0-based cursor line.
    pub fn new(lines: Vec<String>, cursor: usize) -> Self {
        Self { lines, cursor }
    }

    /// Creates a source from document text.
    ///
    /// `\r\n` line endings are accepted.
    pub fn from_text(text: &str, cursor: usize) -> Self {
        Self::new(text.lines().map(str::to_string).collect(), cursor)
    }

    /// Returns the 0-based cursor line.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl BlockSource for DocumentSource {
    fn document_lines(&self) -> Vec<String> {
        self.lines.clone()
    }

    fn block_lines(&self) -> Vec<String> {
        find_block(&self.lines, self.cursor)
    }
}
