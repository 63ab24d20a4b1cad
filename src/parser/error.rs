//! Error types for request block parsing.
//!
//! Every variant is detected before any network call is attempted.

use std::fmt;

/// Errors that can occur while turning a block into a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The block contains nothing but comments and blank lines.
    EmptyBlock,

    /// The first significant line is not `METHOD url`.
    MalformedRequestLine {
        /// The offending line as written
        line: String,
    },

    /// The request declares a JSON content type but its body is not valid JSON.
    InvalidJsonBody {
        /// Parser message from serde_json
        reason: String,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::EmptyBlock => write!(f, "Request was empty."),
            ParseError::MalformedRequestLine { line } => {
                write!(
                    f,
                    "Could not find method or URL in '{}'. Expected format: 'METHOD url' with METHOD one of GET, POST, DELETE, PUT, HEAD, OPTIONS, PATCH",
                    line
                )
            }
            ParseError::InvalidJsonBody { reason } => {
                write!(f, "Request body is not valid JSON: {}", reason)
            }
        }
    }
}

impl std::error::Error for ParseError {}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        ParseError::InvalidJsonBody {
            reason: err.to_string(),
        }
    }
}
