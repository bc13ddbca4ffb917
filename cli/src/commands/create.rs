//! `sonm-cloud create` — place market orders.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use sonm_common::SONM_CATALOG_ID;

use crate::app::AppContext;

/// Arguments for the create command.
#[derive(Args)]
pub struct CreateArgs {
    /// Hardware type id (only `SONM` is offered)
    #[arg(long, default_value = SONM_CATALOG_ID)]
    pub hardware_type: String,

    /// OS image id (only `SONM` is offered)
    #[arg(long, default_value = SONM_CATALOG_ID)]
    pub os_image: String,

    /// Number of orders to place
    #[arg(long, short = 'n', default_value_t = 1)]
    pub count: usize,
}

/// Run `sonm-cloud create`.
///
/// Prints one pending instance per order the marketplace confirmed, which
/// may be fewer than `--count`.
///
/// # Errors
///
/// Returns an error if the node endpoint, CLI path, or price is not configured.
pub async fn run(args: &CreateArgs, app: &AppContext) -> Result<ExitCode> {
    let created = app
        .reconciler()?
        .create_instances(&args.hardware_type, &args.os_image, args.count)
        .await?;
    if created.len() < args.count && !app.is_json() {
        app.output.warn(&format!(
            "{} of {} orders placed",
            created.len(),
            args.count
        ));
    }
    app.renderer().instances(&created)?;
    Ok(ExitCode::SUCCESS)
}
