//! HTTP request execution error types.
//!
//! Every failure of the outbound call is mapped onto one of a fixed set of
//! kinds so the presenter can show a one-line cause.

use std::fmt;

/// Category of a [`RequestError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestErrorKind {
    /// The URL has no scheme.
    SchemaMissing,
    /// The URL scheme is not `http` or `https`.
    SchemaInvalid,
    /// The URL cannot be parsed or has no host.
    UrlInvalid,
    /// The host could not be reached.
    ConnectionFailed,
    /// The request did not complete within the configured timeout.
    TimedOut,
    /// Anything else.
    Other,
}

/// Errors that can occur during HTTP request execution.
#[derive(Debug)]
pub enum RequestError {
    /// The URL has no scheme, e.g. `example.com/path`.
    MissingSchema(String),

    /// The URL uses a scheme other than `http` or `https`.
    InvalidSchema(String),

    /// The URL could not be parsed or has no host.
    InvalidUrl(String),

    /// Connecting to the host failed (DNS, refused connection, TLS handshake).
    ConnectionFailed(String),

    /// The request timed out.
    Timeout,

    /// Any other failure while building or sending the request, including an
    /// attachment file that cannot be opened.
    Other(String),
}

impl RequestError {
    /// Returns the category of this error.
    pub fn kind(&self) -> RequestErrorKind {
        match self {
            RequestError::MissingSchema(_) => RequestErrorKind::SchemaMissing,
            RequestError::InvalidSchema(_) => RequestErrorKind::SchemaInvalid,
            RequestError::InvalidUrl(_) => RequestErrorKind::UrlInvalid,
            RequestError::ConnectionFailed(_) => RequestErrorKind::ConnectionFailed,
            RequestError::Timeout => RequestErrorKind::TimedOut,
            RequestError::Other(_) => RequestErrorKind::Other,
        }
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::MissingSchema(url) => write!(f, "URL is missing schema: {}", url),
            RequestError::InvalidSchema(scheme) => {
                write!(f, "URL has invalid schema: {}", scheme)
            }
            RequestError::InvalidUrl(msg) => write!(f, "URL is invalid: {}", msg),
            RequestError::ConnectionFailed(msg) => write!(f, "Cannot connect to host: {}", msg),
            RequestError::Timeout => write!(f, "Connection timed out."),
            RequestError::Other(msg) => write!(f, "Error sending request: {}", msg),
        }
    }
}

impl std::error::Error for RequestError {}

/// Convert reqwest errors to RequestError.
impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RequestError::Timeout
        } else if err.is_connect() {
            RequestError::ConnectionFailed(err.to_string())
        } else {
            RequestError::Other(err.to_string())
        }
    }
}

/// Convert URL parsing errors to RequestError.
impl From<url::ParseError> for RequestError {
    fn from(err: url::ParseError) -> Self {
        match err {
            url::ParseError::RelativeUrlWithoutBase => RequestError::MissingSchema(err.to_string()),
            _ => RequestError::InvalidUrl(err.to_string()),
        }
    }
}
