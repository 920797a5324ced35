use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use error::CliError;
use settings::Settings;

mod cli;
mod commands;
mod error;
mod io;
mod settings;

fn run(cli: Cli) -> Result<(), CliError> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if cli.threads.is_some() {
        settings.threads = cli.threads;
    }

    match cli.command {
        Command::Extract {
            network,
            routes,
            out,
        } => commands::extract(&settings, &network, &routes, &out),
        Command::Estimate {
            segments,
            out,
            max_speed,
            spacing,
        } => commands::estimate(&settings, &segments, &out, max_speed, spacing),
        Command::Aggregate {
            segments,
            csv,
            corridors,
            out,
        } => commands::aggregate_corridors(
            &segments,
            &csv,
            corridors.as_deref().zip(out.as_deref()),
        ),
        Command::Inspect { segments, top } => commands::inspect(&segments, top),
    }
}

fn main() -> ExitCode {
    // Core log records are bridged into tracing by the subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
