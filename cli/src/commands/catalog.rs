//! `sonm-cloud verify-access`, `hardware-types`, `os-images`.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::catalog;

/// Run `sonm-cloud verify-access`.
///
/// # Errors
///
/// Returns an error if output rendering fails.
pub fn verify_access(app: &AppContext) -> Result<ExitCode> {
    let granted = catalog::verify_access();
    app.renderer().access(granted)?;
    Ok(if granted {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Run `sonm-cloud hardware-types`.
///
/// # Errors
///
/// Returns an error if output rendering fails.
pub fn hardware_types(app: &AppContext) -> Result<ExitCode> {
    app.renderer()
        .hardware_types(&catalog::available_hardware_types())?;
    Ok(ExitCode::SUCCESS)
}

/// Run `sonm-cloud os-images`.
///
/// # Errors
///
/// Returns an error if output rendering fails.
pub fn os_images(app: &AppContext) -> Result<ExitCode> {
    app.renderer().os_images(&catalog::available_os_images())?;
    Ok(ExitCode::SUCCESS)
}
