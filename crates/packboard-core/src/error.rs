//! Unified error types for packboard

use thiserror::Error;

/// Unified error type for all packboard operations
#[derive(Error, Debug)]
pub enum PackboardError {
    // Transport errors
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    // Metrics engine errors
    #[error("Analysis error: {0}")]
    Analysis(String),

    // Consumer errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Generic
    #[error("{0}")]
    Other(String),
}

/// Result type alias using PackboardError
pub type Result<T> = std::result::Result<T, PackboardError>;
