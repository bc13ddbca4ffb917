//! `sonm-cloud list` — report managed deals as instances.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;

/// Run `sonm-cloud list`.
///
/// Deals whose task has gone missing get a new task started as a side
/// effect.
///
/// # Errors
///
/// Returns an error if the node endpoint or CLI path is not configured.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    let instances = app.reconciler()?.list_instances().await?;
    app.renderer().instances(&instances)?;
    Ok(ExitCode::SUCCESS)
}
