use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found error.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A state machine was asked to make a transition it does not allow.
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// Key-value storage error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Simulated payment failure.
    #[error("Payment failed: {0}")]
    Payment(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Storage(e.to_string())
    }
}

/// Result type alias for the application.
pub type Result<T> = std::result::Result<T, AppError>;
