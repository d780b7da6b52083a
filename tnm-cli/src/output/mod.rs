//! Output formatting module

use anyhow::Result;
use tnm_api::{ClassificationRecord, IcdOExtraction, Output};

/// Extraction results for one input file
#[derive(Debug, Clone)]
pub struct DocumentResult {
    /// Display name of the source file
    pub source: String,
    /// Classification records with metadata
    pub output: Output,
    /// Morphology codes, when requested
    pub morphology: Option<IcdOExtraction>,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output the results of a single document
    fn format_document(&mut self, document: &DocumentResult) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

/// Compact `T=pT1 N=pN1 (5/13)` rendering of a record
pub(crate) fn record_summary(record: &ClassificationRecord) -> String {
    let mut summary = record
        .iter()
        .map(|component| format!("{}={}", component.kind, component.token()))
        .collect::<Vec<_>>()
        .join(" ");
    if record.is_merged() {
        summary.push_str(" (merged)");
    }
    summary
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

#[cfg(test)]
pub(crate) mod test_support {
    use super::DocumentResult;
    use tnm_api::{configure, MorphologyProcessor};

    pub fn document(source: &str, text: &str, with_morphology: bool) -> DocumentResult {
        let processor = configure("de", false, false, true).unwrap();
        let morphology = with_morphology
            .then(|| MorphologyProcessor::new().unwrap().process_text(text));
        DocumentResult {
            source: source.to_string(),
            output: processor.process_text(text).unwrap(),
            morphology,
        }
    }
}
