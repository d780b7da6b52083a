//! Language-specific boundary defaults
//!
//! The extractor treats the base language tokenizer as an external collaborator:
//! given a language tag it needs default prefix, suffix and infix split rules,
//! tokenizer exceptions and the word-continuation consonant set. These are kept
//! in TOML files, embedded at build time and parsed once.

pub mod config;
pub mod loader;

pub use config::LanguageConfig;
pub use loader::{get_language_config, list_available_languages};

use std::path::PathBuf;

/// Where the language defaults come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageSource {
    /// Built-in language by code, name or alias
    BuiltIn(String),
    /// External TOML configuration file
    File(PathBuf),
}

impl LanguageSource {
    /// Resolve to a validated configuration
    pub fn load(&self) -> crate::Result<LanguageConfig> {
        match self {
            LanguageSource::BuiltIn(name) => get_language_config(name).cloned(),
            LanguageSource::File(path) => LanguageConfig::from_file(path),
        }
    }

    /// Human-readable description of the source
    pub fn display_name(&self) -> String {
        match self {
            LanguageSource::BuiltIn(name) => format!("Built-in: {name}"),
            LanguageSource::File(path) => format!("External: {}", path.display()),
        }
    }
}

impl Default for LanguageSource {
    fn default() -> Self {
        LanguageSource::BuiltIn("de".to_string())
    }
}

impl From<&str> for LanguageSource {
    fn from(name: &str) -> Self {
        LanguageSource::BuiltIn(name.to_string())
    }
}
