//! # neurite CLI - compartmental spiking-network simulation
//!
//! Command-line entry points for the neurite simulator: standard network
//! runs and metabolic dysfunction studies, with CSV export of the recorded
//! data and post-hoc stability metrics.

use clap::Parser;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod error;

use commands::NeuriteCli;

fn main() {
    let cli = NeuriteCli::parse();

    // Initialize logging with environment variable support
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    if let Err(err) = cli.execute() {
        error!("Command failed: {}", err);
        std::process::exit(1);
    }
}
