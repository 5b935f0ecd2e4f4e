//! Error types for dataset loading

use marketmood_core::InvalidRecord;
use thiserror::Error;

/// Dataset loading errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("JSON parsing error at line {line}: {source}")]
    LineParse {
        line: usize,
        source: serde_json::Error,
    },

    #[error("Invalid record: {0}")]
    InvalidRecord(#[from] InvalidRecord),

    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias for dataset operations
pub type Result<T> = std::result::Result<T, Error>;
