//! Error types for document store access

use crate::store::Collection;
use thiserror::Error;

/// Document store errors
///
/// An empty collection is never an error: reads return an empty list or
/// `None` instead.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store unreachable: {0}")]
    Connectivity(String),

    #[error("Insert into '{collection}' rejected: {reason}")]
    Write { collection: Collection, reason: String },

    #[error("Failed to encode document for '{collection}': {source}")]
    Encode {
        collection: Collection,
        source: serde_json::Error,
    },

    #[error("Document in '{collection}' does not match its record schema: {source}")]
    Decode {
        collection: Collection,
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Whether the failure happened before the store could be reached.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, StoreError::Connectivity(_))
    }
}

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
