use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the historical dataset or location files.
///
/// All of them are fatal: the service cannot answer any request without data.
#[derive(Error, Debug)]
pub enum ModelError {
    /// The dataset file does not exist
    #[error("Dataset file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A file or directory could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the Polars CSV reader
    #[error("CSV error: {0}")]
    Csv(#[from] polars::error::PolarsError),

    /// A required column is absent from the header
    #[error("Missing column '{0}' in dataset")]
    MissingColumn(String),

    /// A timestamp cell could not be parsed into a date and time
    #[error("Invalid timestamp '{value}' at row {row}")]
    InvalidTimestamp { row: usize, value: String },
}

/// Type alias for Result with ModelError
pub type Result<T> = std::result::Result<T, ModelError>;
