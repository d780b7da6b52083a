//! Configuration structures and validation
//!
//! This module defines the TOML schema for language-specific boundary defaults.

use crate::error::{CoreError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root language configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageConfig {
    pub metadata: Metadata,
    #[serde(default)]
    pub tokenizer: Tokenizer,
    #[serde(default)]
    pub exceptions: Exceptions,
    pub boundary: Boundary,
}

/// Language metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub code: String,
    pub name: String,
    /// Alternative names accepted by the loader
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Split rules inherited from the base tokenizer of the language
///
/// Every entry is a regex fragment. Prefixes are matched at the start of a unit,
/// suffixes at its end, infixes anywhere inside.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tokenizer {
    #[serde(default)]
    pub prefixes: Vec<String>,
    #[serde(default)]
    pub suffixes: Vec<String>,
    #[serde(default)]
    pub infixes: Vec<String>,
}

/// Literal strings that are never split
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Exceptions {
    #[serde(default)]
    pub literals: Vec<String>,
}

/// Boundary lookahead defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boundary {
    /// Consonants that continue an ordinary word after a code-like fragment
    pub word_continuation: String,
}

impl LanguageConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: LanguageConfig = toml::from_str(toml_str)
            .map_err(|e| CoreError::Configuration(format!("Failed to parse language config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate an external configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            CoreError::Configuration(msg) => {
                CoreError::Configuration(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.metadata.code.trim().is_empty() {
            return Err(CoreError::Configuration(
                "metadata.code must not be empty".to_string(),
            ));
        }

        if self.metadata.name.trim().is_empty() {
            return Err(CoreError::Configuration(
                "metadata.name must not be empty".to_string(),
            ));
        }

        if self.boundary.word_continuation.is_empty() {
            return Err(CoreError::Configuration(
                "boundary.word_continuation must not be empty".to_string(),
            ));
        }

        if let Some(ch) = self
            .boundary
            .word_continuation
            .chars()
            .find(|ch| !ch.is_alphabetic())
        {
            return Err(CoreError::Configuration(format!(
                "boundary.word_continuation may only contain letters, found '{ch}'"
            )));
        }

        let fragments = self
            .tokenizer
            .prefixes
            .iter()
            .chain(&self.tokenizer.suffixes)
            .chain(&self.tokenizer.infixes);
        for fragment in fragments {
            if fragment.is_empty() {
                return Err(CoreError::Configuration(
                    "empty tokenizer pattern".to_string(),
                ));
            }
            Regex::new(fragment)?;
        }

        Ok(())
    }

    /// Whether `name` refers to this language (code, name or alias)
    pub fn answers_to(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.metadata.code.to_lowercase() == name
            || self.metadata.name.to_lowercase() == name
            || self.metadata.aliases.iter().any(|a| a.to_lowercase() == name)
    }
}
