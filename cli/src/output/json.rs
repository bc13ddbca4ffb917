//! JSON output helpers.
//!
//! Every `--json` result is a single pretty-printed document on stdout;
//! failures use the error-object schema from `format_error`.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::json;

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Stable error code for the failure, used by host integrations to branch
/// without parsing messages.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    use crate::domain::{ConfigError, MarketError};

    if let Some(e) = err.downcast_ref::<ConfigError>() {
        return match e {
            ConfigError::MissingSetting { .. } => "missing_setting",
            ConfigError::UnknownKey { .. } => "unknown_setting",
            ConfigError::InvalidValue { .. } => "invalid_setting",
        };
    }
    if err.downcast_ref::<MarketError>().is_some() {
        return "marketplace_error";
    }
    "error"
}

/// Renders results as JSON documents on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    /// Print any serializable value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", to_pretty(value)?);
        Ok(())
    }

    /// Print `{"access": <bool>}`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_access(&self, granted: bool) -> Result<()> {
        self.render(&json!({ "access": granted }))
    }

    /// Print `{"path": "..."}`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_path(&self, path: &Path) -> Result<()> {
        self.render(&json!({ "path": path.display().to_string() }))
    }

    /// Print `{"key": "...", "value": "..."}`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_value(&self, key: &str, value: &str) -> Result<()> {
        self.render(&json!({ "key": key, "value": value }))
    }
}

/// Pretty-print `value` as JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("JSON serialization failed")
}
