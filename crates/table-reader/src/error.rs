//! Error types for table reading.

use std::path::PathBuf;

use landgrid_common::GridError;
use thiserror::Error;

/// Result type for table reader operations.
pub type ReaderResult<T> = Result<T, ReaderError>;

/// Error types for reading tables from delimited text.
#[derive(Error, Debug)]
pub enum ReaderError {
    /// Input path does not exist or is not a regular file
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed delimited text (ragged rows, bad UTF-8)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Input has no header row
    #[error("Missing header row in {0}")]
    MissingHeader(String),

    /// Columns could not be assembled into a table
    #[error("Invalid table: {0}")]
    Table(#[from] GridError),
}
