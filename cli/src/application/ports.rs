//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use anyhow::Result;
use serde_json::Value;

use crate::domain::{Endpoint, Settings};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}

// ── Marketplace Port ──────────────────────────────────────────────────────────

/// Marketplace operations, one per CLI subcommand.
///
/// Every method returns the decoded JSON document on success. Spawn failures,
/// non-zero exits, and non-JSON output surface as `MarketError`s wrapped in
/// `anyhow::Error`.
#[allow(async_fn_in_trait)]
pub trait Marketplace {
    /// `deals list`
    async fn deals_list(&self, ep: &Endpoint) -> Result<Value>;
    /// `deals status <id>`
    async fn deal_status(&self, ep: &Endpoint, deal_id: &str) -> Result<Value>;
    /// `deals finish <id>`
    async fn deal_finish(&self, ep: &Endpoint, deal_id: &str) -> Result<Value>;
    /// `tasks start <dealId> <descriptor> --timeout <timeout>`
    async fn task_start(
        &self,
        ep: &Endpoint,
        deal_id: &str,
        descriptor: &Path,
        timeout: &str,
    ) -> Result<Value>;
    /// `tasks stop <supplierId> <taskId>`
    async fn task_stop(&self, ep: &Endpoint, supplier_id: &str, task_id: &str) -> Result<Value>;
    /// `market create <price> <descriptor> [supplierId]`
    async fn market_create(
        &self,
        ep: &Endpoint,
        price: &str,
        descriptor: &Path,
        supplier: Option<&str>,
    ) -> Result<Value>;
}

// ── Settings Port ─────────────────────────────────────────────────────────────

/// Read access to the host's key/value configuration.
///
/// Loaded once per operation so every call sees current values.
pub trait SettingsSource {
    /// Snapshot the current settings.
    fn load(&self) -> Result<Settings>;
}

// ── Descriptor Port ───────────────────────────────────────────────────────────

/// Persists rendered descriptors where the marketplace CLI can read them.
pub trait DescriptorWriter {
    /// Write `contents` to a fresh file and return its path.
    ///
    /// Files are not cleaned up afterwards.
    fn write(&self, contents: &str) -> Result<PathBuf>;
}
