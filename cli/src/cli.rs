//! CLI argument parsing with clap derive

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, OutputFlags};
use crate::commands;

/// SONM marketplace cloud provider for the Deadline render manager
#[derive(Parser)]
#[command(
    name = "sonm-cloud",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Log debug detail to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file (default: $SONM_CLOUD_CONFIG or ~/.sonm-cloud/config.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check that the plugin can reach the marketplace
    VerifyAccess,

    /// List offered hardware types
    HardwareTypes,

    /// List offered OS images
    OsImages,

    /// List managed deals as instances
    List,

    /// Place market orders for new instances
    Create(commands::create::CreateArgs),

    /// Finish deals
    Terminate(commands::lifecycle::IdsArgs),

    /// Stop the render task in deals
    Stop(commands::lifecycle::IdsArgs),

    /// Start the render task in deals
    Start(commands::lifecycle::IdsArgs),

    /// Reboot instances (not supported by the marketplace)
    Reboot(commands::lifecycle::IdsArgs),

    /// Inspect configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            verbose: _,
            config,
            command,
        } = self;
        let app = AppContext::new(AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            config,
        })?;

        match command {
            Command::VerifyAccess => commands::catalog::verify_access(&app),
            Command::HardwareTypes => commands::catalog::hardware_types(&app),
            Command::OsImages => commands::catalog::os_images(&app),
            Command::List => commands::list::run(&app).await,
            Command::Create(args) => commands::create::run(&args, &app).await,
            Command::Terminate(args) => commands::lifecycle::terminate(&args, &app).await,
            Command::Stop(args) => commands::lifecycle::stop(&args, &app).await,
            Command::Start(args) => commands::lifecycle::start(&args, &app).await,
            Command::Reboot(args) => commands::lifecycle::reboot(&args, &app),
            Command::Config(cmd) => commands::config::run(&app, &cmd),
        }
    }
}
