//! CSV export of recorded simulation data
//!
//! Renders a [`neurite_core::SimulationRecord`] as three tables: per-tick
//! membrane potentials, the spike raster, and the per-tick activity summary.
//! Export is a collaborator of the simulation core: an I/O failure on one
//! table is logged and skipped without aborting the run or the remaining
//! tables.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod csv;
pub mod error;

pub use csv::{sanitize_prefix, CsvExporter};
pub use error::{ExportError, Result};
