//! Serialization of classified records.
//!
//! - [`write_csv`] / [`read_csv`]: the tabular file format, one header row followed
//!   by one row per record
//! - [`render`]: text rendering for standard output (plain lines, JSON or a table)

mod csv_rows;
mod display;

pub use csv_rows::{read_csv, read_csv_file, write_csv, write_csv_file, CSV_HEADERS};
pub use display::{render, OutputFormat};

/// Errors raised while serializing or parsing records
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The CSV header does not match [`CSV_HEADERS`]
    #[error("Unexpected CSV header: {0}")]
    Header(String),
}
