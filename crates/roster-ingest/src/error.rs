//! Error types for roster table ingestion.

use std::path::PathBuf;

use roster_model::ModelError;
use thiserror::Error;

/// Errors that can occur while loading input tables.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to open or read a file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// The csv reader rejected the file.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// A data line carries values beyond the last header.
    #[error("{path} line {line}: {width} values but only {expected} headers")]
    RowTooWide {
        path: PathBuf,
        line: u64,
        width: usize,
        expected: usize,
    },

    /// The parsed table violates a dataset invariant.
    #[error("invalid table {path}: {source}")]
    Model {
        path: PathBuf,
        #[source]
        source: ModelError,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
