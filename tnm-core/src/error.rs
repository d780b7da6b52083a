//! Error types for the extraction core

use crate::component::ComponentKind;
use thiserror::Error;

/// Errors raised while configuring or driving the extraction pipeline
#[derive(Debug, Error)]
pub enum CoreError {
    /// No built-in language configuration for the requested code
    #[error("language '{0}' not supported")]
    UnsupportedLanguage(String),

    /// Invalid language or extractor configuration
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A rule pattern failed to compile
    #[error("invalid rule pattern: {0}")]
    InvalidRule(#[from] regex::Error),

    /// A component code outside the closed TNM component set
    #[error("unknown component '{0}'")]
    UnknownComponent(String),

    /// A record slot was overwritten by a match that does not contain the current one
    #[error("component {kind} is already set and the new match does not contain it")]
    InvalidState {
        /// The slot that was written twice
        kind: ComponentKind,
    },

    /// I/O error while reading an external configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
