//! Error types for Taskpad
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in Taskpad
#[derive(Debug, Error)]
pub enum TaskpadError {
    /// Caller supplied a bad description or identifier
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Storage/persistence error
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TaskpadError {
    /// Whether this error was caused by the caller's input (HTTP 400)
    pub fn is_client_error(&self) -> bool {
        matches!(self, TaskpadError::InvalidInput(_))
    }
}

/// Result type alias for Taskpad operations
pub type Result<T> = std::result::Result<T, TaskpadError>;
