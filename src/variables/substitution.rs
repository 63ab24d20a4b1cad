//! Variable declarations and placeholder substitution.
//!
//! Variables are declared in comment lines:
//!
//! ```text
//! # $host = api.example.com     (global, anywhere in the document)
//! # :id = 42                    (local, inside the request block)
//! ```
//!
//! The declared token itself, sigil included, is the placeholder: every
//! occurrence of `$host` or `:id` in the URL, header values and body is
//! replaced verbatim. Replacement is a single pass per declaration in table
//! order and is not recursive: a value is never expanded on its own, although
//! a later pass still sees text that an earlier pass produced.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a global declaration such as `# $host = example.test`.
static GLOBAL_DECLARATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^# ?(\$[^$ ]+)\s*=\s*(.+)$").expect("Failed to compile global variable regex")
});

/// Matches a local declaration such as `# :id = 42`.
static LOCAL_DECLARATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^# ?(:[^: ]+)\s*=\s*(.+)$").expect("Failed to compile local variable regex")
});

/// Where a variable was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Declared anywhere in the document with the `$` sigil.
    Global,
    /// Declared inside the request block with the `:` sigil.
    Local,
}

impl Scope {
    fn regex(&self) -> &'static Regex {
        match self {
            Scope::Global => &GLOBAL_DECLARATION_REGEX,
            Scope::Local => &LOCAL_DECLARATION_REGEX,
        }
    }
}

/// Ordered mapping from placeholder token to replacement text.
///
/// Inserting an existing token replaces its value but keeps its original
/// position, so a redeclaration does not change substitution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableTable {
    entries: IndexMap<String, String>,
}

impl VariableTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `token` with `value`.
    pub fn insert(&mut self, token: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(token.into(), value.into());
    }

    /// Looks up the value of `token`.
    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(token, value)` pairs in substitution order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Replaces every declared token in `text`.
    pub fn substitute(&self, text: &str) -> String {
        substitute(text, self)
    }
}

/// Parses a single line as a declaration of the given scope.
///
/// # Returns
///
/// `Some((token, value))` if the line is a declaration, `None` otherwise.
pub fn parse_declaration(line: &str, scope: Scope) -> Option<(String, String)> {
    scope
        .regex()
        .captures(line)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
}

/// Builds the variable table for one request block.
///
/// Global declarations are collected from the whole document, then local
/// declarations from the block are applied on top of them. Because the block
/// is part of the document, a `$` declaration inside the block is global too.
///
/// # Examples
///
/// ```
/// use http_block::variables::resolve;
///
/// let document = ["# $host = example.test", "", "GET http://$host/:path", "# :path=items"];
/// let table = resolve(&document, &document[2..]);
///
/// assert_eq!(table.get("$host"), Some("example.test"));
/// assert_eq!(table.get(":path"), Some("items"));
/// assert_eq!(table.substitute("http://$host/:path"), "http://example.test/items");
/// ```
pub fn resolve<D, B>(document_lines: &[D], block_lines: &[B]) -> VariableTable
where
    D: AsRef<str>,
    B: AsRef<str>,
{
    let mut table = VariableTable::new();

    for line in document_lines {
        if let Some((token, value)) = parse_declaration(line.as_ref(), Scope::Global) {
            table.insert(token, value);
        }
    }

    for line in block_lines {
        if let Some((token, value)) = parse_declaration(line.as_ref(), Scope::Local) {
            table.insert(token, value);
        }
    }

    log::debug!("Resolved {} variable(s)", table.len());
    table
}

/// Replaces every token of `table` in `text`, one pass per entry in table order.
///
/// There is no word-boundary check: when one token is a prefix of another
/// (`:id` and `:idx`), whichever was declared first is replaced first.
pub fn substitute(text: &str, table: &VariableTable) -> String {
    let mut result = text.to_string();
    for (token, value) in table.iter() {
        if result.contains(token) {
            result = result.replace(token, value);
        }
    }
    result
}
