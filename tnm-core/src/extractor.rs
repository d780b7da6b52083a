//! The configured extraction pipeline
//!
//! text → spans → raw matches → component matches → records → (merged) records

use crate::boundary::BoundaryEngine;
use crate::builder::build_records;
use crate::error::Result;
use crate::language::{LanguageConfig, LanguageSource};
use crate::matcher::{MatcherOptions, PatternMatcher};
use crate::merge::merge_records;
use crate::postprocess::PostProcessor;
use crate::record::ClassificationRecord;
use crate::rules::RuleSet;
use std::sync::Arc;

/// Settings fixed at configuration time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Source of the boundary defaults
    pub language: LanguageSource,
    /// Also match letter and value separated by whitespace (`T 2`)
    pub allow_spaces: bool,
    /// Fold adjacent compatible records together
    pub merge_matches: bool,
    /// Register the parenthetical-detail templates
    pub detect_parentheses: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            language: LanguageSource::default(),
            allow_spaces: false,
            merge_matches: false,
            detect_parentheses: true,
        }
    }
}

impl ExtractorConfig {
    fn matcher_options(&self) -> MatcherOptions {
        MatcherOptions {
            allow_spaces: self.allow_spaces,
            detect_parentheses: self.detect_parentheses,
        }
    }
}

/// Extracts TNM classification records from text
///
/// All rules are compiled by [`TnmExtractor::configure`]. Afterwards the
/// extractor is immutable, so one instance can serve any number of threads.
#[derive(Debug, Clone)]
pub struct TnmExtractor {
    config: ExtractorConfig,
    language_code: String,
    rules: Arc<RuleSet>,
    boundary: BoundaryEngine,
    matcher: PatternMatcher,
    postprocessor: PostProcessor,
}

impl TnmExtractor {
    /// Build an extractor with the canonical rule set
    pub fn configure(config: ExtractorConfig) -> Result<Self> {
        let language = config.language.load()?;
        Self::with_rules(config, &language, Arc::new(RuleSet::canonical()))
    }

    /// Build an extractor from an already loaded language and a custom rule set
    pub fn with_rules(
        config: ExtractorConfig,
        language: &LanguageConfig,
        rules: Arc<RuleSet>,
    ) -> Result<Self> {
        let boundary = BoundaryEngine::for_components(language, &rules)?;
        let matcher = PatternMatcher::new(&rules, config.matcher_options())?;
        let postprocessor = PostProcessor::new(&rules)?;

        log::debug!(
            "configured TNM extractor: language={}, allow_spaces={}, merge_matches={}, detect_parentheses={}",
            language.metadata.code,
            config.allow_spaces,
            config.merge_matches,
            config.detect_parentheses
        );

        Ok(Self {
            language_code: language.metadata.code.clone(),
            config,
            rules,
            boundary,
            matcher,
            postprocessor,
        })
    }

    /// Extract all classification records from `text`, in document order
    ///
    /// Text without any component code gives an empty list.
    pub fn transform(&self, text: &str) -> Result<Vec<ClassificationRecord>> {
        let spans = self.boundary.segment(text);
        let raw = self.matcher.find_matches(text, &spans);
        let components = raw.into_iter().map(|m| self.postprocessor.process(m));
        let records = build_records(components)?;

        log::trace!(
            "{} chars, {} spans, {} records before merging",
            text.chars().count(),
            spans.len(),
            records.len()
        );

        if self.config.merge_matches {
            Ok(merge_records(records))
        } else {
            Ok(records)
        }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Code of the language the boundary defaults came from
    pub fn language(&self) -> &str {
        &self.language_code
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}

/// Configure an extractor for a built-in language
pub fn configure(
    language: &str,
    allow_spaces: bool,
    merge_matches: bool,
    detect_parentheses: bool,
) -> Result<TnmExtractor> {
    TnmExtractor::configure(ExtractorConfig {
        language: LanguageSource::from(language),
        allow_spaces,
        merge_matches,
        detect_parentheses,
    })
}
