//! `sonm-cloud terminate|stop|start|reboot` — per-instance lifecycle actions.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;

/// Instance ids (deal ids) to act on.
#[derive(Args)]
pub struct IdsArgs {
    /// Deal ids
    pub ids: Vec<String>,
}

/// Run `sonm-cloud terminate`.
///
/// # Errors
///
/// Returns an error if the settings cannot be read.
pub async fn terminate(args: &IdsArgs, app: &AppContext) -> Result<ExitCode> {
    let done = app.reconciler()?.terminate_instances(&args.ids).await?;
    app.renderer().outcome("Terminated", &args.ids, &done)?;
    Ok(ExitCode::SUCCESS)
}

/// Run `sonm-cloud stop`.
///
/// # Errors
///
/// Returns an error if the settings cannot be read.
pub async fn stop(args: &IdsArgs, app: &AppContext) -> Result<ExitCode> {
    let done = app.reconciler()?.stop_instances(&args.ids).await?;
    app.renderer().outcome("Stopped", &args.ids, &done)?;
    Ok(ExitCode::SUCCESS)
}

/// Run `sonm-cloud start`.
///
/// # Errors
///
/// Returns an error if the settings cannot be read.
pub async fn start(args: &IdsArgs, app: &AppContext) -> Result<ExitCode> {
    let done = app.reconciler()?.start_instances(&args.ids).await?;
    app.renderer().outcome("Started", &args.ids, &done)?;
    Ok(ExitCode::SUCCESS)
}

/// Run `sonm-cloud reboot`. The marketplace has no reboot, so nothing is
/// rebooted.
///
/// # Errors
///
/// Returns an error if the settings cannot be read.
pub fn reboot(args: &IdsArgs, app: &AppContext) -> Result<ExitCode> {
    let done = app.reconciler()?.reboot_instances(&args.ids);
    app.renderer().outcome("Rebooted", &args.ids, &done)?;
    Ok(ExitCode::SUCCESS)
}
