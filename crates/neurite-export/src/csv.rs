//! CSV table writers for simulation records

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use neurite_core::SimulationRecord;

use crate::error::Result;

/// Replace characters unsuitable for filenames in a condition name
///
/// Spaces become underscores, matching the file naming of study exports
/// (`Severe_Hypoglycemia_spike_raster.csv` and the like).
pub fn sanitize_prefix(name: &str) -> String {
    name.replace(' ', "_")
}

/// CSV exporter bound to an output directory and filename prefix
#[derive(Debug, Clone)]
pub struct CsvExporter {
    base_dir: PathBuf,
    prefix: String,
}

impl CsvExporter {
    /// Create an exporter, creating the output directory if needed
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&base_dir)?;
        Ok(Self {
            base_dir,
            prefix: String::new(),
        })
    }

    /// Set a filename prefix (e.g. a sanitized condition name plus `_`)
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Write all three tables, skipping any that fail
    ///
    /// A table that cannot be written is logged as a warning and dropped;
    /// the remaining tables are still attempted. Returns the paths that
    /// were written successfully.
    pub fn export_all(&self, record: &SimulationRecord) -> Vec<PathBuf> {
        let tables: [(&str, fn(&SimulationRecord, &Path) -> Result<()>); 3] = [
            ("membrane_potentials.csv", export_membrane_potentials),
            ("spike_raster.csv", export_spike_raster),
            ("activity_summary.csv", export_activity_summary),
        ];

        let mut written = Vec::new();
        for (name, export) in tables {
            let path = self.path_for(name);
            match export(record, &path) {
                Ok(()) => written.push(path),
                Err(err) => {
                    log::warn!("skipping export of {}: {}", path.display(), err);
                }
            }
        }
        written
    }

    /// Output path for a table name under the configured prefix
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.base_dir.join(format!("{}{}", self.prefix, name))
    }
}

/// Write the membrane potential table: `Timestep,Neuron_0..Neuron_{n-1}`
///
/// One row per recorded tick, columns ordered by neuron index. The column
/// count follows the recorded snapshot width.
pub fn export_membrane_potentials(record: &SimulationRecord, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);

    let neuron_count = record
        .membrane_potentials
        .first()
        .map(|row| row.len())
        .unwrap_or(0);
    write!(writer, "Timestep")?;
    for neuron in 0..neuron_count {
        write!(writer, ",Neuron_{}", neuron)?;
    }
    writeln!(writer)?;

    for (timestep, row) in record.membrane_potentials.iter().enumerate() {
        write!(writer, "{}", timestep)?;
        for potential in row {
            write!(writer, ",{}", potential)?;
        }
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the spike raster table: `Timestep,Neuron_ID`, one row per event
pub fn export_spike_raster(record: &SimulationRecord, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);

    writeln!(writer, "Timestep,Neuron_ID")?;
    for event in &record.spike_events {
        writeln!(writer, "{},{}", event.timestep, event.neuron.raw())?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the activity summary: `Timestep,Average_Potential,Spike_Count`
///
/// Spike counts are derived by bucketing the spike-event list per tick.
pub fn export_activity_summary(record: &SimulationRecord, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);

    writeln!(writer, "Timestep,Average_Potential,Spike_Count")?;
    let buckets = record.spikes_per_timestep();
    for (timestep, activity) in record.network_activity.iter().enumerate() {
        let spike_count = buckets.get(timestep).copied().unwrap_or(0);
        writeln!(writer, "{},{},{}", timestep, activity, spike_count)?;
    }

    writer.flush()?;
    Ok(())
}
