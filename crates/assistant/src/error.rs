//! Error types for the assistant

use thiserror::Error;

/// Assistant errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Message is empty")]
    EmptyMessage,

    #[error("Invalid rule: {0}")]
    InvalidRule(String),
}

/// Result type alias for assistant operations
pub type Result<T> = std::result::Result<T, Error>;
