//! API error types

use std::string::FromUtf8Error;
use thiserror::Error;
use tnm_core::CoreError;

/// API-level errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Extraction core error
    #[error("extraction error: {0}")]
    Core(#[from] CoreError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 conversion error
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] FromUtf8Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
