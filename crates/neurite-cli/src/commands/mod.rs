//! CLI command implementations for neurite

use clap::{Parser, Subcommand};

use crate::error::CliResult;

pub mod run;
pub mod study;

/// neurite - compartmental spiking-network simulator
#[derive(Parser, Debug)]
#[command(
    name = "neurite",
    version,
    about = "Compartmental spiking-network simulator",
    long_about = "neurite simulates a small network of biologically structured \
                  neurons under scripted stimulation and metabolic dysfunction \
                  scenarios, exporting recorded membrane potentials, spike \
                  rasters, and activity summaries as CSV."
)]
pub struct NeuriteCli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a standard network simulation
    Run(run::RunCommand),

    /// Run metabolic dysfunction studies
    Study(study::StudyCommand),
}

impl NeuriteCli {
    /// Execute the CLI command
    pub fn execute(self) -> CliResult<()> {
        match self.command {
            Commands::Run(cmd) => cmd.execute(),
            Commands::Study(cmd) => cmd.execute(),
        }
    }
}
