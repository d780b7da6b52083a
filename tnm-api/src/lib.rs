//! Public API for TNM classification extraction
//!
//! This crate provides a stable interface over `tnm-core` that hides the
//! pipeline stages behind a processor facade.
//!
//! ```rust
//! use tnm_api::{Config, Input, TnmProcessor};
//!
//! let config = Config::builder().language("de")?.merge_matches(true).build()?;
//! let processor = TnmProcessor::with_config(config)?;
//! let output = processor.process(Input::from_text("ypT0 N0 M0, R0"))?;
//! assert_eq!(output.metadata.record_count, output.records.len());
//! # Ok::<(), tnm_api::ApiError>(())
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod dto;
pub mod error;
pub mod languages;

use error::Result;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tnm_core::{MorphologyExtractor, TnmExtractor};

// Re-export key types
pub use config::{Config, ConfigBuilder};
pub use dto::{Input, Metadata, Output};
pub use error::ApiError;
pub use languages::{available_languages, validate_language_file, LanguageInfo};
pub use tnm_core::{
    ClassificationRecord, ComponentKind, ComponentMatch, DetailMap, IcdOExtraction,
    LanguageSource, Modifier, MorphologyMatch,
};

/// Main entry point for TNM extraction
///
/// The processor is cheap to clone and can be shared between threads.
#[derive(Debug, Clone)]
pub struct TnmProcessor {
    inner: Arc<TnmExtractor>,
    config: Config,
}

impl TnmProcessor {
    /// Create a processor with default configuration (German, strict spacing)
    pub fn new() -> Result<Self> {
        Self::with_config(Config::default())
    }

    /// Create a processor for a specific built-in language
    pub fn with_language(language: &str) -> Result<Self> {
        let config = Config::builder().language(language)?.build()?;
        Self::with_config(config)
    }

    /// Create a processor with custom configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let inner = TnmExtractor::configure(config.extractor_config().clone())?;
        Ok(Self {
            inner: Arc::new(inner),
            config,
        })
    }

    /// Extract classification records from the input
    pub fn process(&self, input: Input) -> Result<Output> {
        let start = Instant::now();

        let text = input.read_text()?;
        let records = self.inner.transform(&text)?;
        let elapsed = start.elapsed();

        log::trace!(
            "processed {} bytes into {} records in {:?}",
            text.len(),
            records.len(),
            elapsed
        );

        let metadata = Metadata {
            total_chars: text.chars().count(),
            record_count: records.len(),
            processing_time_ms: elapsed.as_millis() as u64,
            language: self.inner.language().to_string(),
        };

        Ok(Output { records, metadata })
    }

    /// Process text directly (convenience method)
    pub fn process_text(&self, text: &str) -> Result<Output> {
        self.process(Input::from_text(text))
    }

    /// Extract only the records, without metadata
    pub fn extract(&self, text: &str) -> Result<Vec<ClassificationRecord>> {
        Ok(self.inner.transform(text)?)
    }

    /// Get the current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Code of the configured language
    pub fn language(&self) -> &str {
        self.inner.language()
    }
}

/// Entry point for ICD-O morphology code extraction
#[derive(Debug, Clone)]
pub struct MorphologyProcessor {
    inner: Arc<MorphologyExtractor>,
}

impl MorphologyProcessor {
    /// Create a processor with the default language
    pub fn new() -> Result<Self> {
        Self::with_config(&Config::default())
    }

    /// Create a processor for a specific built-in language
    pub fn with_language(language: &str) -> Result<Self> {
        let config = Config::builder().language(language)?.build()?;
        Self::with_config(&config)
    }

    /// Create a processor using the language of `config`
    ///
    /// The TNM matching options do not apply to morphology codes.
    pub fn with_config(config: &Config) -> Result<Self> {
        let inner = MorphologyExtractor::configure(config.language())?;
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Extract morphology codes from the input
    pub fn process(&self, input: Input) -> Result<IcdOExtraction> {
        let text = input.read_text()?;
        Ok(self.inner.transform(&text))
    }

    /// Process text directly (convenience method)
    pub fn process_text(&self, text: &str) -> IcdOExtraction {
        self.inner.transform(text)
    }
}

// Convenience functions

/// Configure a TNM processor for a built-in language
pub fn configure(
    language: &str,
    allow_spaces: bool,
    merge_matches: bool,
    detect_parentheses: bool,
) -> Result<TnmProcessor> {
    let config = Config::builder()
        .language(language)?
        .allow_spaces(allow_spaces)
        .merge_matches(merge_matches)
        .detect_parentheses(detect_parentheses)
        .build()?;
    TnmProcessor::with_config(config)
}

/// Extract records from text with default configuration
pub fn extract_text(text: &str) -> Result<Output> {
    TnmProcessor::new()?.process(Input::from_text(text))
}

/// Extract records from a file with default configuration
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<Output> {
    TnmProcessor::new()?.process(Input::from_file(path.as_ref()))
}
