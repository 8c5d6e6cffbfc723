//! Standard simulation command

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use neurite_core::{Simulator, SimulatorConfig};
use neurite_export::CsvExporter;

use crate::error::{CliError, CliResult};

/// Run a standard network simulation
#[derive(Args, Debug)]
pub struct RunCommand {
    /// Number of simulation ticks
    #[arg(short, long, default_value = "5000")]
    pub timesteps: usize,

    /// Random seed for reproducible runs
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Outgoing connection attempts per neuron during wiring
    #[arg(long, default_value = "6")]
    pub density: usize,

    /// Background noise probability per neuron per tick
    #[arg(long, default_value = "0.6")]
    pub noise: f32,

    /// Output directory for CSV tables and the metrics summary
    #[arg(short, long, default_value = "results")]
    pub out_dir: PathBuf,

    /// Filename prefix for exported tables
    #[arg(long, default_value = "")]
    pub prefix: String,
}

impl RunCommand {
    /// Execute the run command
    pub fn execute(self) -> CliResult<()> {
        if self.timesteps == 0 {
            return Err(CliError::invalid_args("timesteps must be > 0"));
        }

        let mut config = SimulatorConfig::default()
            .with_connection_density(self.density)
            .with_noise_probability(self.noise);
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }

        let mut simulator = Simulator::new(config)?;
        simulator.run_standard(self.timesteps);

        let exporter = CsvExporter::new(&self.out_dir)?.with_prefix(self.prefix);
        let written = exporter.export_all(simulator.record());
        for path in &written {
            info!("wrote {}", path.display());
        }

        let metrics = simulator.stability_metrics();
        info!(
            "spikes: {}, ISI CV: {:.4}, homeostatic deviation: {:.4}",
            simulator.record().total_spikes,
            metrics.coefficient_of_variation,
            metrics.homeostatic_deviation
        );

        let summary = serde_json::json!({
            "timesteps": simulator.record().total_timesteps,
            "total_spikes": simulator.record().total_spikes,
            "metrics": metrics,
        });
        let summary_path = self.out_dir.join("summary.json");
        std::fs::write(
            &summary_path,
            serde_json::to_string_pretty(&summary).map_err(|e| CliError::Generic(e.into()))?,
        )?;
        info!("wrote {}", summary_path.display());

        Ok(())
    }
}
