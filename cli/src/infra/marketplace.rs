//! Infrastructure implementation of the `Marketplace` port.
//!
//! `CliMarketplace<R>` routes every marketplace operation through the SONM
//! command-line client via a `CommandRunner`, always requesting JSON output
//! from the configured node.

use std::path::Path;
use std::process::Output;

use anyhow::Result;
use serde_json::Value;
use tracing::debug;

use crate::application::ports::{CommandRunner, Marketplace};
use crate::domain::{Endpoint, MarketError};

/// Infrastructure adapter over the marketplace CLI binary.
///
/// Generic over `R: CommandRunner` so that tests can inject a canned runner
/// without spawning real processes.
pub struct CliMarketplace<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> CliMarketplace<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Run `<cli> <args...> --node <node> --out json` and decode stdout.
    async fn invoke(&self, ep: &Endpoint, args: &[&str]) -> Result<Value> {
        let command = args.join(" ");
        let mut full = args.to_vec();
        full.extend_from_slice(&["--node", ep.node.as_str(), "--out", "json"]);
        debug!(cli = %ep.cli, %command, "invoking marketplace cli");

        let output = self
            .runner
            .run(&ep.cli, &full)
            .await
            .map_err(|e| MarketError::Process {
                command: command.clone(),
                detail: format!("{e:#}"),
            })?;

        if !output.status.success() {
            return Err(MarketError::Process {
                detail: format!("{}: {}", output.status, captured(&output)),
                command,
            }
            .into());
        }

        serde_json::from_slice(&output.stdout).map_err(|_| {
            MarketError::InvalidOutput {
                command,
                output: captured(&output),
            }
            .into()
        })
    }
}

impl<R: CommandRunner> Marketplace for CliMarketplace<R> {
    async fn deals_list(&self, ep: &Endpoint) -> Result<Value> {
        self.invoke(ep, &["deals", "list"]).await
    }

    async fn deal_status(&self, ep: &Endpoint, deal_id: &str) -> Result<Value> {
        self.invoke(ep, &["deals", "status", deal_id]).await
    }

    async fn deal_finish(&self, ep: &Endpoint, deal_id: &str) -> Result<Value> {
        self.invoke(ep, &["deals", "finish", deal_id]).await
    }

    async fn task_start(
        &self,
        ep: &Endpoint,
        deal_id: &str,
        descriptor: &Path,
        timeout: &str,
    ) -> Result<Value> {
        let descriptor = descriptor.to_string_lossy().into_owned();
        self.invoke(
            ep,
            &["tasks", "start", deal_id, descriptor.as_str(), "--timeout", timeout],
        )
        .await
    }

    async fn task_stop(&self, ep: &Endpoint, supplier_id: &str, task_id: &str) -> Result<Value> {
        self.invoke(ep, &["tasks", "stop", supplier_id, task_id])
            .await
    }

    async fn market_create(
        &self,
        ep: &Endpoint,
        price: &str,
        descriptor: &Path,
        supplier: Option<&str>,
    ) -> Result<Value> {
        let descriptor = descriptor.to_string_lossy().into_owned();
        let mut args = vec!["market", "create", price, descriptor.as_str()];
        if let Some(supplier) = supplier {
            args.push(supplier);
        }
        self.invoke(ep, &args).await
    }
}

/// Captured stdout and stderr for error reports.
fn captured(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    match (stdout.trim(), stderr.trim()) {
        (out, "") => out.to_string(),
        ("", err) => err.to_string(),
        (out, err) => format!("{out}\n{err}"),
    }
}
