//! Integration tests module
//!
//! Shared helpers for the end-to-end and property tests.

pub mod end_to_end_test;
pub mod substitution_properties_test;

use http_block::host::DocumentSource;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize test environment (run once)
pub fn init_test_env() {
    INIT.call_once(|| {
        http_block::config::reset_config();
    });
}

/// Builds a document source from lines, with the cursor on `cursor`.
pub fn document(lines: &[&str], cursor: usize) -> DocumentSource {
    DocumentSource::new(lines.iter().map(|s| s.to_string()).collect(), cursor)
}
