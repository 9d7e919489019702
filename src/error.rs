//! Error types for the attribute store.

use thiserror::Error;

/// Errors raised at the serialization edges of the store.
///
/// The accessor surface itself never fails; absent lookups come back as
/// `None` instead.
#[derive(Debug, Error)]
pub enum WatchmanError {
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Expected a JSON object, got {0}")]
    NotAnObject(String),
}

impl From<serde_json::Error> for WatchmanError {
    fn from(e: serde_json::Error) -> Self {
        WatchmanError::Serialization(e.to_string())
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, WatchmanError>;
