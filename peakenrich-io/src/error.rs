use std::io;
use std::path::PathBuf;

use thiserror::Error;

use peakenrich_core::ModelError;

/// Error type for peakenrich-io operations.
#[derive(Error, Debug)]
pub enum ReaderError {
    /// The input file does not exist.
    #[error("File not found: {0}")]
    MissingFile(PathBuf),

    /// A BAM file has no `.bai` index next to it.
    #[error("BAM index missing for {0}")]
    MissingIndex(PathBuf),

    /// The file exists but could not be opened or decoded.
    #[error("Can't read file: {0}")]
    FileReadError(String),

    /// A required column is absent from a tabular input.
    #[error("Missing required column '{column}' in {path}")]
    MissingColumn { column: String, path: PathBuf },

    /// A row could not be typed.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// CSV reading or writing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error occurred during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for peakenrich-io operations.
pub type Result<T> = std::result::Result<T, ReaderError>;
