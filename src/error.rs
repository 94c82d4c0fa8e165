//! Error types for Buzzr
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in Buzzr
#[derive(Debug, Error)]
pub enum BuzzrError {
    /// Missing or mis-typed configuration attribute
    #[error("Config error: {0}")]
    Config(String),

    /// Detection query against the vision collaborator failed
    #[error("Vision error: {0}")]
    Vision(String),

    /// Buzzer command against the actuator collaborator failed
    #[error("Actuator error: {0}")]
    Actuator(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Buzzr operations
pub type Result<T> = std::result::Result<T, BuzzrError>;
