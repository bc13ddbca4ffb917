//! `sonm-cloud config` — inspect the effective settings.

use std::collections::BTreeMap;
use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::SettingsSource as _;
use crate::domain::settings::VALID_SETTING_KEYS;
use crate::domain::validate_setting_key;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show every setting with its effective value
    Show,
    /// Print one effective setting value
    Get {
        /// Setting name, e.g. `NodeConfig`
        key: String,
    },
    /// Print the settings file location
    Path,
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the settings cannot be read or the key is unknown.
pub fn run(app: &AppContext, cmd: &ConfigCommand) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Show => show(app),
        ConfigCommand::Get { key } => get(app, key),
        ConfigCommand::Path => {
            app.renderer().path(app.settings.path())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn show(app: &AppContext) -> Result<ExitCode> {
    let settings = app.settings.load()?;
    let values: BTreeMap<String, String> = VALID_SETTING_KEYS
        .iter()
        .map(|key| ((*key).to_string(), settings.effective(key)))
        .collect();
    app.renderer().settings(&values, app.settings.path())?;
    Ok(ExitCode::SUCCESS)
}

fn get(app: &AppContext, key: &str) -> Result<ExitCode> {
    validate_setting_key(key)?;
    let settings = app.settings.load()?;
    app.renderer().value(key, &settings.effective(key))?;
    Ok(ExitCode::SUCCESS)
}
