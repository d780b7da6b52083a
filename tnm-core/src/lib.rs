//! Rule-based extraction of TNM cancer staging classifications
//!
//! Clinical reports state tumor stages in a compact code language
//! (`pT1b pN1 (5/13) M0 G2 R0`). This crate finds those codes in free text,
//! splits off their modifier prefixes, parses lymph-node counts and other
//! parenthetical details, and groups co-occurring codes into classification
//! records.
//!
//! # Pipeline
//!
//! - [`boundary`]: segments text into spans so that codes and parenthetical
//!   blocks never straddle a split point
//! - [`matcher`]: finds per-component templates at span starts
//! - [`postprocess`]: prefixes, details and canonical values
//! - [`builder`]: partitions the match stream into records
//! - [`merge`]: optional fold of adjacent compatible records
//!
//! # Glued codes
//!
//! A code written directly after other letters is split off, so `ypT0N0M0`
//! and `PN1` both yield their codes. The same rule reads the `R2` at the end
//! of `HER2` as a residual tumor code. Such uppercase words are rare next to
//! staging text and the false positive is accepted.
//!
//! # Example
//!
//! ```rust
//! use tnm_core::{configure, ComponentKind, Modifier};
//!
//! let extractor = configure("de", false, false, true).unwrap();
//! let records = extractor.transform("Befund: pT1 pN1 (5/13) cM0").unwrap();
//! assert_eq!(records.len(), 1);
//!
//! let n = records[0].get(ComponentKind::N).unwrap();
//! assert_eq!(n.value, "N1");
//! assert_eq!(n.prefixes, vec![Modifier::Pathological]);
//! assert_eq!(n.details.lymphnodes_affected, Some(5));
//! assert_eq!(n.details.lymphnodes_examined, Some(13));
//! ```

pub mod boundary;
pub mod builder;
pub mod component;
pub mod error;
pub mod extractor;
pub mod language;
pub mod matcher;
pub mod merge;
pub mod morphology;
pub mod postprocess;
pub mod record;
pub mod rules;
pub mod span;

pub use boundary::BoundaryEngine;
pub use builder::{build_records, ClassificationBuilder};
pub use component::{ComponentKind, ComponentMatch, DetailMap, Modifier};
pub use error::{CoreError, Result};
pub use extractor::{configure, ExtractorConfig, TnmExtractor};
pub use language::{LanguageConfig, LanguageSource};
pub use matcher::{MatcherOptions, PatternMatcher, RawMatch, Variant};
pub use merge::{merge_pair, merge_records};
pub use morphology::{IcdO, IcdOExtraction, MorphologyExtractor, MorphologyMatch};
pub use postprocess::PostProcessor;
pub use record::ClassificationRecord;
pub use rules::{ComponentRule, PrefixGrammar, RuleSet};
pub use span::Span;
