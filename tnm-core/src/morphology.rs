//! ICD-O morphology codes (`8140/3`)
//!
//! Independent of the TNM pipeline apart from the span type and the boundary
//! engine, which runs here with `/` as an extra split character and without
//! component code rules.

use crate::boundary::BoundaryEngine;
use crate::error::Result;
use crate::language::{LanguageConfig, LanguageSource};
use crate::span::Span;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// One morphology code occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MorphologyMatch {
    pub span: Span,
    /// Code without whitespace, e.g. `1234/3`
    pub value: String,
}

impl MorphologyMatch {
    pub fn token(&self) -> &str {
        &self.span.text
    }

    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn end(&self) -> usize {
        self.span.end
    }
}

/// Codes grouped by ICD-O axis
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IcdO {
    pub morphology: Vec<MorphologyMatch>,
}

/// Result of a morphology extraction
///
/// Serializes as `{"icd-o": {"morphology": [...]}}`, or `{}` when nothing was found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IcdOExtraction {
    #[serde(rename = "icd-o", default, skip_serializing_if = "Option::is_none")]
    pub icd_o: Option<IcdO>,
}

impl IcdOExtraction {
    pub fn is_empty(&self) -> bool {
        self.icd_o.is_none()
    }

    /// Morphology codes in document order
    pub fn morphology(&self) -> &[MorphologyMatch] {
        self.icd_o
            .as_ref()
            .map(|icd_o| icd_o.morphology.as_slice())
            .unwrap_or_default()
    }
}

/// Finds `dddd / d` morphology codes
#[derive(Debug, Clone)]
pub struct MorphologyExtractor {
    boundary: BoundaryEngine,
    pattern: Regex,
}

impl MorphologyExtractor {
    pub fn new(language: &LanguageConfig) -> Result<Self> {
        let boundary = BoundaryEngine::builder(language)
            .prefixes(["/"])
            .infixes(["/"])
            .suffixes(["/"])
            .build()?;
        log::debug!("configured morphology extractor for '{}'", language.metadata.code);
        Ok(Self {
            boundary,
            pattern: Regex::new(r"^[0-9]{4}\s*/\s*[0-9]")?,
        })
    }

    pub fn configure(language: &LanguageSource) -> Result<Self> {
        Self::new(&language.load()?)
    }

    pub fn transform(&self, text: &str) -> IcdOExtraction {
        let spans = self.boundary.segment(text);
        let ends: Vec<usize> = spans.iter().map(Span::byte_end).collect();

        let mut morphology = Vec::new();
        let mut covered_until = 0;
        for span in &spans {
            if span.byte_start < covered_until || span.is_whitespace() {
                continue;
            }
            let Some(m) = self.pattern.find(&text[span.byte_start..]) else {
                continue;
            };
            let end = span.byte_start + m.end();
            if ends.binary_search(&end).is_err() {
                continue;
            }

            let span = Span::new(text, span.byte_start..end, span.start);
            let value = span.text.chars().filter(|ch| !ch.is_whitespace()).collect();
            covered_until = end;
            morphology.push(MorphologyMatch { span, value });
        }

        log::trace!("{} morphology codes", morphology.len());
        IcdOExtraction {
            icd_o: (!morphology.is_empty()).then_some(IcdO { morphology }),
        }
    }
}
