//! Error types for the vv-app layer.

use std::path::PathBuf;

use crate::config::ConfigError;

/// Application error wrapping the lower crates' errors behind one type for
/// frontends.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to decode payload: {0}")]
    Decode(#[from] vv_payload::PayloadError),

    #[error("Failed to read payload file: {path}")]
    PayloadFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read payload from {origin}: {source}")]
    PayloadStream {
        origin: String,
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for vv-app operations.
pub type AppResult<T> = Result<T, AppError>;
