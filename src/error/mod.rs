//! Error handling module for the CLI boundary

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for FAVC operations
#[derive(Error, Debug)]
pub enum FavcError {
    /// Missing or contradictory command-line options
    #[error("Usage error: {0}")]
    Usage(String),

    /// Input file not found or inaccessible
    #[error("File not found: {path}")]
    InputNotFound { path: String },

    /// Input file extension is not a supported container
    #[error("Unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    /// Batch document missing or unreadable
    #[error("Clips file {path} could not be loaded: {message}")]
    ClipsFile { path: String, message: String },

    /// Invalid configuration value or file
    #[error("Configuration error: {0}")]
    Config(String),

    /// Planning or engine failure
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Report serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for FAVC operations
pub type FavcResult<T> = std::result::Result<T, FavcError>;
