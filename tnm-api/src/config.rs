//! High-level configuration API

use crate::error::{ApiError, Result};
use std::path::PathBuf;
use tnm_core::language::get_language_config;
use tnm_core::{ExtractorConfig, LanguageSource};

/// High-level configuration for TNM extraction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    inner: ExtractorConfig,
}

impl Config {
    /// Space-tolerant configuration that also merges adjacent records
    pub fn lenient() -> Self {
        Self {
            inner: ExtractorConfig {
                allow_spaces: true,
                merge_matches: true,
                ..ExtractorConfig::default()
            },
        }
    }

    /// Create a builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Source of the boundary defaults
    pub fn language(&self) -> &LanguageSource {
        &self.inner.language
    }

    /// Whether `T 2` style codes are matched
    pub fn allow_spaces(&self) -> bool {
        self.inner.allow_spaces
    }

    /// Whether adjacent compatible records are merged
    pub fn merge_matches(&self) -> bool {
        self.inner.merge_matches
    }

    /// Whether parenthetical details are matched
    pub fn detect_parentheses(&self) -> bool {
        self.inner.detect_parentheses
    }

    pub(crate) fn extractor_config(&self) -> &ExtractorConfig {
        &self.inner
    }
}

/// Configuration builder
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Use a built-in language by code, name or alias
    ///
    /// Fails right away for languages that have no built-in configuration.
    pub fn language(mut self, language: impl Into<String>) -> Result<Self> {
        let language = language.into();
        let resolved = get_language_config(&language)?;
        self.config.inner.language = LanguageSource::BuiltIn(resolved.metadata.code.clone());
        Ok(self)
    }

    /// Use an external language configuration file
    pub fn language_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.inner.language = LanguageSource::File(path.into());
        self
    }

    /// Match letter and value separated by whitespace
    pub fn allow_spaces(mut self, allow: bool) -> Self {
        self.config.inner.allow_spaces = allow;
        self
    }

    /// Merge adjacent compatible records
    pub fn merge_matches(mut self, merge: bool) -> Self {
        self.config.inner.merge_matches = merge;
        self
    }

    /// Match parenthetical details such as lymph-node counts
    pub fn detect_parentheses(mut self, detect: bool) -> Self {
        self.config.inner.detect_parentheses = detect;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config> {
        if let LanguageSource::File(path) = &self.config.inner.language {
            if !path.is_file() {
                return Err(ApiError::Config(format!(
                    "language configuration file not found: {}",
                    path.display()
                )));
            }
        }

        Ok(self.config)
    }
}
