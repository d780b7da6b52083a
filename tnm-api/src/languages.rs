//! Language configuration discovery and validation

use crate::error::Result;
use std::path::Path;
use tnm_core::language::{get_language_config, list_available_languages};
use tnm_core::LanguageConfig;

/// Summary of a language configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LanguageInfo {
    /// Language code, e.g. `de`
    pub code: String,
    /// Display name
    pub name: String,
    /// Alternative names accepted by the loader
    pub aliases: Vec<String>,
    /// Number of literals that are never split
    pub exception_count: usize,
}

impl From<&LanguageConfig> for LanguageInfo {
    fn from(config: &LanguageConfig) -> Self {
        Self {
            code: config.metadata.code.clone(),
            name: config.metadata.name.clone(),
            aliases: config.metadata.aliases.clone(),
            exception_count: config.exceptions.literals.len(),
        }
    }
}

/// Built-in languages, sorted by code
pub fn available_languages() -> Result<Vec<LanguageInfo>> {
    let mut codes = list_available_languages();
    codes.sort_unstable();
    codes
        .into_iter()
        .map(|code| Ok(LanguageInfo::from(get_language_config(code)?)))
        .collect()
}

/// Load and validate an external language configuration file
pub fn validate_language_file(path: impl AsRef<Path>) -> Result<LanguageInfo> {
    let config = LanguageConfig::from_file(path.as_ref())?;
    log::debug!(
        "validated language configuration '{}' from {}",
        config.metadata.code,
        path.as_ref().display()
    );
    Ok(LanguageInfo::from(&config))
}
