//! Error types for registry ingestion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop a whole file from loading.
///
/// Row-level problems are not errors; they are skipped and counted in the
/// [`IngestReport`](crate::IngestReport).
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("required column '{column}' not found in {path}")]
    MissingColumn { path: PathBuf, column: &'static str },
}

pub type Result<T> = std::result::Result<T, IngestError>;
