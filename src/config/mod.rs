//! Configuration management.
//!
//! Configuration is read from the embedding environment at interpretation
//! time: a JSON settings document under the `"http-block"` key, merged with
//! defaults, then `HTTP_BLOCK_*` environment variables on top. The result is
//! kept in a process-wide singleton that the interpreter only reads.

pub mod schema;

pub use schema::{HttpBlockConfig, SplitOrientation};

use once_cell::sync::Lazy;
use serde_json::Value;
use std::sync::RwLock;

/// Key of the settings section this crate reads.
pub const SETTINGS_KEY: &str = "http-block";

/// Global configuration instance.
///
/// This is lazily initialized on first access and can be updated when settings change.
static CONFIG: Lazy<RwLock<HttpBlockConfig>> =
    Lazy::new(|| RwLock::new(HttpBlockConfig::default()));

/// Loads configuration from a settings JSON value.
///
/// This function reads the `"http-block"` settings, merges them with
/// defaults, validates the result, and updates the global configuration.
///
/// # Returns
///
/// `Ok(HttpBlockConfig)` with the loaded configuration, or `Err` if validation fails.
///
/// # Example
///
/// ```no_run
/// use http_block::config::load_config;
/// use serde_json::json;
///
/// let settings = json!({
///     "http-block": {
///         "verifySsl": false,
///         "preserveResponses": true
///     }
/// });
///
/// let config = load_config(Some(settings)).unwrap();
/// assert!(!config.verify_ssl);
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<HttpBlockConfig, String> {
    let mut config = HttpBlockConfig::default();

    if let Some(settings) = settings_json {
        if let Some(section) = settings.get(SETTINGS_KEY) {
            match serde_json::from_value::<HttpBlockConfig>(section.clone()) {
                Ok(user_config) => {
                    config = config.merge(&user_config);
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse {} settings: {}. Using defaults.",
                        SETTINGS_KEY,
                        e
                    );
                }
            }
        }
    }

    config
        .validate()
        .map_err(|e| format!("Invalid configuration: {}. Using defaults.", e))?;

    if let Ok(mut global_config) = CONFIG.write() {
        *global_config = config.clone();
    }

    Ok(config)
}

/// Applies `HTTP_BLOCK_*` overrides to `config`.
///
/// `lookup` resolves a variable name to its value, which keeps this testable
/// without touching the process environment. Unparseable values are ignored
/// with a warning.
pub fn apply_env_overrides<F>(config: &mut HttpBlockConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let flags: [(&str, &mut bool); 5] = [
        ("HTTP_BLOCK_VERIFY_SSL", &mut config.verify_ssl),
        ("HTTP_BLOCK_JSON_ESCAPE_UNICODE", &mut config.json_escape_unicode),
        ("HTTP_BLOCK_PRESERVE_RESPONSES", &mut config.preserve_responses),
        ("HTTP_BLOCK_FOCUS_OUTPUT_WINDOW", &mut config.focus_output_window),
        ("HTTP_BLOCK_RESULT_VSPLIT", &mut config.result_vsplit),
    ];

    for (name, slot) in flags {
        if let Some(raw) = lookup(name) {
            match parse_flag(&raw) {
                Some(value) => *slot = value,
                None => log::warn!("Ignoring {}={:?}: expected 1/0 or true/false", name, raw),
            }
        }
    }

    if let Some(raw) = lookup("HTTP_BLOCK_TIMEOUT") {
        match raw.trim().parse::<u64>() {
            Ok(ms) if ms > 0 => config.timeout = ms,
            _ => log::warn!("Ignoring HTTP_BLOCK_TIMEOUT={:?}: expected milliseconds > 0", raw),
        }
    }
}

/// Loads configuration from settings and the process environment.
///
/// Environment variables take precedence over the settings document. The
/// global configuration is updated with the result.
pub fn load_from_env(settings_json: Option<Value>) -> Result<HttpBlockConfig, String> {
    let mut config = load_config(settings_json)?;
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());

    if let Ok(mut global_config) = CONFIG.write() {
        *global_config = config.clone();
    }

    Ok(config)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Gets the current global configuration.
///
/// Returns the default configuration if none has been loaded yet.
pub fn get_config() -> HttpBlockConfig {
    CONFIG
        .read()
        .map(|c| c.clone())
        .unwrap_or_else(|_| HttpBlockConfig::default())
}

/// Updates the global configuration in place.
///
/// If the update leaves the configuration invalid, it is reset to defaults.
pub fn update_config<F>(updater: F)
where
    F: FnOnce(&mut HttpBlockConfig),
{
    if let Ok(mut config) = CONFIG.write() {
        updater(&mut config);

        if let Err(e) = config.validate() {
            log::warn!("Configuration validation failed after update: {}", e);
            *config = HttpBlockConfig::default();
        }
    }
}

/// Resets the configuration to defaults.
pub fn reset_config() {
    if let Ok(mut config) = CONFIG.write() {
        *config = HttpBlockConfig::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use serial_test::serial;
    use std::collections::HashMap;

    #[test]
    #[serial]
    fn test_load_config_with_defaults() {
        let config = load_config(None).unwrap();
        assert!(config.verify_ssl);
        assert_eq!(config.timeout, 30000);
        reset_config();
    }

    #[test]
    #[serial]
    fn test_load_config_with_user_settings() {
        let settings = json!({
            "http-block": {
                "verifySsl": false,
                "jsonEscapeUnicode": true,
                "resultVsplit": true
            }
        });

        let config = load_config(Some(settings)).unwrap();
        assert!(!config.verify_ssl);
        assert!(config.json_escape_unicode);
        assert_eq!(config.split_orientation(), SplitOrientation::Vertical);
        assert!(!config.preserve_responses);
        reset_config();
    }

    #[test]
    #[serial]
    fn test_load_config_invalid_json_falls_back() {
        let settings = json!({
            "http-block": {
                "timeout": "not-a-number"
            }
        });

        let config = load_config(Some(settings)).unwrap();
        assert_eq!(config.timeout, 30000);
        reset_config();
    }

    #[test]
    #[serial]
    fn test_load_config_validation_error() {
        let settings = json!({
            "http-block": {
                "timeout": 0
            }
        });

        let result = load_config(Some(settings));
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("timeout must be greater than 0"));
        reset_config();
    }

    #[test]
    #[serial]
    fn test_other_keys_are_ignored() {
        let settings = json!({
            "rest-client": {
                "verifySsl": false
            }
        });

        let config = load_config(Some(settings)).unwrap();
        assert!(config.verify_ssl);
        reset_config();
    }

    #[test]
    #[serial]
    fn test_get_config_reflects_load() {
        reset_config();
        assert!(get_config().verify_ssl);

        load_config(Some(json!({ "http-block": { "verifySsl": false } }))).unwrap();
        assert!(!get_config().verify_ssl);

        reset_config();
        assert!(get_config().verify_ssl);
    }

    #[test]
    #[serial]
    fn test_update_config() {
        reset_config();

        update_config(|config| {
            config.preserve_responses = true;
        });
        assert!(get_config().preserve_responses);

        reset_config();
    }

    #[test]
    #[serial]
    fn test_update_config_with_invalid_value() {
        reset_config();

        update_config(|config| {
            config.preserve_responses = true;
            config.timeout = 0;
        });

        let config = get_config();
        assert_eq!(config.timeout, 30000);
        assert!(!config.preserve_responses);

        reset_config();
    }

    #[test]
    fn test_apply_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("HTTP_BLOCK_VERIFY_SSL", "0"),
            ("HTTP_BLOCK_JSON_ESCAPE_UNICODE", "true"),
            ("HTTP_BLOCK_FOCUS_OUTPUT_WINDOW", "1"),
            ("HTTP_BLOCK_TIMEOUT", "5000"),
        ]
        .into_iter()
        .collect();

        let mut config = HttpBlockConfig::default();
        apply_env_overrides(&mut config, |name| env.get(name).map(|v| v.to_string()));

        assert!(!config.verify_ssl);
        assert!(config.json_escape_unicode);
        assert!(config.focus_output_window);
        assert!(!config.preserve_responses);
        assert_eq!(config.timeout, 5000);
    }

    #[test]
    fn test_apply_env_overrides_ignores_garbage() {
        let mut config = HttpBlockConfig::default();
        apply_env_overrides(&mut config, |name| match name {
            "HTTP_BLOCK_VERIFY_SSL" => Some("maybe".to_string()),
            "HTTP_BLOCK_TIMEOUT" => Some("0".to_string()),
            _ => None,
        });

        assert!(config.verify_ssl);
        assert_eq!(config.timeout, 30000);
    }
}
