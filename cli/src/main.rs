//! SONM cloud provider - Deadline render nodes on the SONM marketplace

#![cfg_attr(test, allow(clippy::expect_used))]

use std::process::ExitCode;

use clap::Parser;
use sonm_cloud::cli::Cli;
use sonm_cloud::output::json;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let is_json = cli.json;
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            report(&e, is_json);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; stdout carries only command results.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn report(e: &anyhow::Error, is_json: bool) {
    if is_json {
        match json::format_error(&format!("{e:#}"), json::error_code(e)) {
            Ok(text) => println!("{text}"),
            Err(_) => eprintln!("Error: {e:#}"),
        }
    } else {
        eprintln!("Error: {e:#}");
    }
}
