//! Error types for the export layer

use thiserror::Error;

/// Result type for export operations
pub type Result<T> = std::result::Result<T, ExportError>;

/// Errors that can occur while exporting recorded data
#[derive(Error, Debug)]
pub enum ExportError {
    /// I/O error while creating or writing an output file
    #[error("I/O error: {source}")]
    Io {
        #[from]
        /// Source I/O error
        source: std::io::Error,
    },
}
