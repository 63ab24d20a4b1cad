//! Configuration schema.
//!
//! This module defines every user-configurable option and its validation.
//! None of these options change how a block is parsed; they control TLS
//! verification, JSON rendering and what the presenter does with the output.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Main configuration structure.
///
/// Read from the `"http-block"` key of a settings document, with missing
/// fields falling back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpBlockConfig {
    /// Whether to validate TLS certificates. Defaults to true.
    ///
    /// **Warning:** disabling validation accepts any certificate, including
    /// self-signed and expired ones.
    #[serde(default = "default_verify_ssl")]
    pub verify_ssl: bool,

    /// Whether pretty-printed JSON escapes non-ASCII characters as `\uXXXX`.
    ///
    /// Defaults to false, which keeps raw Unicode.
    #[serde(default = "default_json_escape_unicode")]
    pub json_escape_unicode: bool,

    /// Display mode the presenter should use per content type.
    #[serde(default = "default_display_modes")]
    pub display_modes: HashMap<String, String>,

    /// Display mode used when the content type has no entry in `display_modes`.
    #[serde(default = "default_display_mode")]
    pub default_display_mode: String,

    /// Whether new output is prepended above previous responses instead of
    /// replacing them. Defaults to false.
    #[serde(default)]
    pub preserve_responses: bool,

    /// Whether the presenter keeps focus on the output after rendering.
    #[serde(default)]
    pub focus_output_window: bool,

    /// Whether the output panel opens as a vertical split.
    #[serde(default)]
    pub result_vsplit: bool,

    /// Request timeout in milliseconds. Must be greater than 0.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

/// Orientation of the panel the presenter opens for output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitOrientation {
    /// Output opens beside the document.
    Vertical,
    /// Output opens below the document.
    Horizontal,
}

impl Default for HttpBlockConfig {
    fn default() -> Self {
        Self {
            verify_ssl: default_verify_ssl(),
            json_escape_unicode: default_json_escape_unicode(),
            display_modes: default_display_modes(),
            default_display_mode: default_display_mode(),
            preserve_responses: false,
            focus_output_window: false,
            result_vsplit: false,
            timeout: default_timeout(),
        }
    }
}

impl HttpBlockConfig {
    /// Validates the configuration.
    ///
    /// # Returns
    ///
    /// `Ok(())` if all settings are valid, or `Err` with a descriptive error message.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout == 0 {
            return Err("timeout must be greater than 0".to_string());
        }

        if self.default_display_mode.trim().is_empty() {
            return Err("defaultDisplayMode must not be empty".to_string());
        }

        Ok(())
    }

    /// Returns the split orientation selected by `result_vsplit`.
    pub fn split_orientation(&self) -> SplitOrientation {
        if self.result_vsplit {
            SplitOrientation::Vertical
        } else {
            SplitOrientation::Horizontal
        }
    }

    /// Returns the display mode for a content type, or the default mode.
    pub fn display_mode_for(&self, content_type: &str) -> &str {
        self.display_modes
            .get(content_type)
            .map(String::as_str)
            .unwrap_or(&self.default_display_mode)
    }

    /// Merges this configuration with another, using values from `other` where present.
    ///
    /// Display modes are merged per content type so a user entry for one
    /// type does not drop the defaults for the others.
    pub fn merge(&self, other: &HttpBlockConfig) -> Self {
        let mut display_modes = self.display_modes.clone();
        display_modes.extend(other.display_modes.clone());

        Self {
            verify_ssl: other.verify_ssl,
            json_escape_unicode: other.json_escape_unicode,
            display_modes,
            default_display_mode: other.default_display_mode.clone(),
            preserve_responses: other.preserve_responses,
            focus_output_window: other.focus_output_window,
            result_vsplit: other.result_vsplit,
            timeout: other.timeout,
        }
    }
}

// Default value functions for serde

fn default_verify_ssl() -> bool {
    true
}

fn default_json_escape_unicode() -> bool {
    false
}

fn default_display_modes() -> HashMap<String, String> {
    let mut modes = HashMap::new();
    modes.insert("application/json".to_string(), "javascript".to_string());
    modes.insert("application/xml".to_string(), "xml".to_string());
    modes.insert("text/html".to_string(), "html".to_string());
    modes
}

fn default_display_mode() -> String {
    "text".to_string()
}

fn default_timeout() -> u64 {
    30000 // 30 seconds in milliseconds
}
