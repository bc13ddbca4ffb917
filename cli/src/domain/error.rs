//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors raised by fail-fast settings validation. These are the only errors
/// the reconciler surfaces to the host.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("[SONM] Please fill {what} ({key}).")]
    MissingSetting { key: &'static str, what: &'static str },

    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

// ── Marketplace errors ────────────────────────────────────────────────────────

/// Failures at the marketplace CLI boundary. The reconciler logs these and
/// degrades its result instead of propagating them.
#[derive(Debug, Error)]
pub enum MarketError {
    /// The CLI could not be run, exited non-zero, or timed out.
    #[error("`{command}` failed: {detail}")]
    Process { command: String, detail: String },

    /// The CLI exited cleanly but its output was not a JSON document.
    #[error("`{command}` returned non-JSON output: {output}")]
    InvalidOutput { command: String, output: String },

    /// The JSON decoded but an expected key was absent or mistyped.
    #[error("unexpected response shape: {0}")]
    Protocol(String),

    /// The backend answered with an explicit `error`/`message` field.
    #[error("marketplace rejected the request: {0}")]
    Backend(String),
}
