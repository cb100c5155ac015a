//! Error types for lumo-core

use thiserror::Error;

/// Main error type for the lumo-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// A backend record violated a data-model invariant
    #[error("invalid {record} record: {message}")]
    InvalidRecord {
        record: &'static str,
        message: String,
    },

    /// Snapshot could not be loaded
    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl Error {
    pub(crate) fn invalid(record: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidRecord {
            record,
            message: message.into(),
        }
    }
}

/// Result type alias for lumo-core
pub type Result<T> = std::result::Result<T, Error>;
