//! Metabolic dysfunction study command

use std::path::PathBuf;

use clap::Args;
use serde::Deserialize;
use tracing::info;

use neurite_core::{MetabolicCondition, Simulator, SimulatorConfig};
use neurite_export::{sanitize_prefix, CsvExporter};

use crate::error::{CliError, CliResult};

/// Run metabolic dysfunction studies
///
/// With no configuration file, runs the four predefined conditions
/// (hypoglycemia, diabetic ketoacidosis, hypoxia, mitochondrial
/// dysfunction) back to back and exports each condition's tables under a
/// sanitized name prefix.
#[derive(Args, Debug)]
pub struct StudyCommand {
    /// Study configuration file (.toml); defaults to the predefined set
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of simulation ticks per condition
    #[arg(short, long, default_value = "2000")]
    pub timesteps: usize,

    /// Random seed for reproducible studies
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Output directory for per-condition CSV tables
    #[arg(short, long, default_value = "results/studies")]
    pub out_dir: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
struct StudyConfig {
    #[serde(default)]
    study: StudySection,
    #[serde(default)]
    conditions: Vec<MetabolicCondition>,
}

#[derive(Debug, Default, Deserialize)]
struct StudySection {
    #[serde(default)]
    name: String,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    timesteps: Option<usize>,
}

impl StudyCommand {
    /// Execute the study command
    pub fn execute(self) -> CliResult<()> {
        if self.timesteps == 0 {
            return Err(CliError::invalid_args("timesteps must be > 0"));
        }

        let (conditions, seed, timesteps, study_name) = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                let cfg: StudyConfig = toml::from_str(&text)
                    .map_err(|e| CliError::config(format!("Invalid study config: {}", e)))?;
                if cfg.conditions.is_empty() {
                    return Err(CliError::config("study config lists no conditions"));
                }
                (
                    cfg.conditions,
                    cfg.study.seed.or(self.seed),
                    cfg.study.timesteps.unwrap_or(self.timesteps),
                    cfg.study.name,
                )
            }
            None => (
                MetabolicCondition::study_set(),
                self.seed,
                self.timesteps,
                String::from("metabolic dysfunction"),
            ),
        };

        info!("study '{}' with {} conditions", study_name, conditions.len());
        std::fs::create_dir_all(&self.out_dir)?;

        let mut summary = Vec::new();
        for (index, condition) in conditions.iter().enumerate() {
            info!(
                "study {}/{}: {}",
                index + 1,
                conditions.len(),
                condition.name
            );

            let mut config = SimulatorConfig::default();
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            let mut simulator = Simulator::new(config)?;
            simulator.run_with_condition(condition, timesteps);

            let prefix = format!("{}_", sanitize_prefix(&condition.name));
            let exporter = CsvExporter::new(&self.out_dir)?.with_prefix(prefix);
            let written = exporter.export_all(simulator.record());
            for path in &written {
                info!("wrote {}", path.display());
            }

            let metrics = simulator.stability_metrics();
            info!(
                "{}: CV {:.4}, homeostatic deviation {:.4}",
                condition.name,
                metrics.coefficient_of_variation,
                metrics.homeostatic_deviation
            );

            summary.push(serde_json::json!({
                "condition": condition.name,
                "timesteps": simulator.record().total_timesteps,
                "total_spikes": simulator.record().total_spikes,
                "metrics": metrics,
            }));
        }

        let summary_path = self.out_dir.join("summary.json");
        std::fs::write(
            &summary_path,
            serde_json::to_string_pretty(&serde_json::json!({ "runs": summary }))
                .map_err(|e| CliError::Generic(e.into()))?,
        )?;
        info!("study summary: {}", summary_path.display());

        Ok(())
    }
}
