//! `dancefloor`: seeding, scale-test and RLS smoke-test tooling for a local
//! dance practice platform.

mod cli;
mod commands;
mod context;
mod logging;
mod reporter;

use std::process::ExitCode;

use clap::Parser;
use dancefloor_domain::DanceFloorError;
use tracing::debug;

use crate::cli::Cli;
use crate::context::AppContext;

#[tokio::main]
async fn main() -> ExitCode {
    // Before parsing, so `.env` can feed clap's env-backed flags.
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();
    logging::init(cli.global.log_format);

    match dotenv {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(err) => debug!(error = %err, "no .env loaded"),
    }

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            let kind = err.downcast_ref::<DanceFloorError>().map_or("other", logging::error_label);
            debug!(kind, error = %err, "command failed");
            eprintln!("\n✗ Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let ctx = AppContext::new(cli.global)?;
    commands::dispatch(&ctx, cli.command).await
}
