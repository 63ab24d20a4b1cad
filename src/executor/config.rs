//! HTTP request execution configuration.
//!
//! The executor only needs the parts of [`HttpBlockConfig`] that affect the
//! outbound call: the timeout and whether TLS certificates are verified.

use crate::config::HttpBlockConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for HTTP request execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Request timeout in milliseconds, covering connection, headers and body.
    pub timeout_ms: u64,

    /// Whether TLS certificates are verified.
    pub verify_ssl: bool,
}

impl ExecutionConfig {
    /// Creates a new ExecutionConfig.
    pub fn new(timeout_ms: u64, verify_ssl: bool) -> Self {
        Self {
            timeout_ms,
            verify_ssl,
        }
    }

    /// Returns the timeout as a `std::time::Duration`.
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Extracts the execution settings from a full configuration.
    pub fn from_config(config: &HttpBlockConfig) -> Self {
        Self {
            timeout_ms: config.timeout,
            verify_ssl: config.verify_ssl,
        }
    }
}
