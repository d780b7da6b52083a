//! Rule-driven segmentation of raw text into spans
//!
//! Text is first cut into whitespace runs and units. Each unit is then peeled
//! from both ends: a prefix (a component code, a punctuation mark, or the text
//! glued in front of a code) and a suffix are split off until neither applies.
//! Whatever remains is split at infix matches. Exception literals are never
//! split.

use crate::error::Result;
use crate::language::LanguageConfig;
use crate::rules::{Lookahead, RuleSet};
use crate::span::Span;
use regex::Regex;
use std::collections::HashSet;
use std::ops::Range;

/// Punctuation split off in front of component codes
pub const CODE_PREFIX_PUNCTUATION: &[&str] = &["-", "/", "\"", "§", r"\$", "&", r"\\"];

/// Characters that always split inside a unit
pub const CODE_INFIXES: &[&str] = &[r"\(", r"\)", "-"];

/// Lowercase letters at which a glued component code may begin
const GLUED_CODE_START: &str = "yraupc";

/// Segments text into ordered, gap-free spans
#[derive(Debug, Clone)]
pub struct BoundaryEngine {
    prefix: Option<Regex>,
    suffix: Option<Regex>,
    infix: Option<Regex>,
    /// One anchored regex per component rule, value boundary included
    codes: Vec<Regex>,
    exceptions: HashSet<String>,
}

impl BoundaryEngine {
    /// Start a builder from the language defaults
    pub fn builder(language: &LanguageConfig) -> BoundaryEngineBuilder<'_> {
        BoundaryEngineBuilder::new(language)
    }

    /// Engine for TNM text: language defaults plus component code rules
    pub fn for_components(language: &LanguageConfig, rules: &RuleSet) -> Result<Self> {
        Self::builder(language)
            .prefixes(CODE_PREFIX_PUNCTUATION.iter().copied())
            .infixes(CODE_INFIXES.iter().copied())
            .component_codes(rules)
            .build()
    }

    /// Split `text` into spans
    ///
    /// The spans partition the text: concatenating their texts gives back the
    /// input, and each span starts where the previous one ends. Whitespace runs
    /// are spans of their own.
    pub fn segment(&self, text: &str) -> Vec<Span> {
        let mut spans = Vec::new();
        let mut pieces = Vec::new();

        for (run, is_whitespace) in runs(text) {
            if is_whitespace {
                push_span(text, &mut spans, run);
                continue;
            }

            pieces.clear();
            self.split_unit(&text[run.clone()], run.start, &mut pieces);
            for piece in pieces.drain(..) {
                push_span(text, &mut spans, piece);
            }
        }

        spans
    }

    fn is_exception(&self, unit: &str) -> bool {
        self.exceptions.contains(unit)
    }

    /// Split one whitespace-free unit starting at byte `base`
    fn split_unit(&self, unit: &str, base: usize, out: &mut Vec<Range<usize>>) {
        let mut prefixes = Vec::new();
        let mut suffixes = Vec::new();
        // Byte window of `unit` that is still unsplit
        let (mut lo, mut hi) = (0, unit.len());

        while lo < hi && !self.is_exception(&unit[lo..hi]) {
            let rest = &unit[lo..hi];

            let pre = self.find_prefix(rest);
            if pre > 0 && pre < rest.len() && self.is_exception(&rest[pre..]) {
                prefixes.push(lo..lo + pre);
                lo += pre;
                continue;
            }

            let suf_start = self.find_suffix(&rest[pre..]).map(|start| pre + start);
            if pre == 0 && suf_start.is_none() {
                break;
            }

            if pre > 0 {
                prefixes.push(lo..lo + pre);
            }
            if let Some(start) = suf_start {
                suffixes.push(lo + start..hi);
                hi = lo + start;
            }
            lo += pre;
        }

        let shift = |r: Range<usize>| base + r.start..base + r.end;
        out.extend(prefixes.into_iter().map(shift));
        if lo < hi {
            self.split_infixes(unit, lo..hi, &mut |r: Range<usize>| out.push(shift(r)));
        }
        out.extend(suffixes.into_iter().rev().map(shift));
    }

    fn split_infixes(&self, unit: &str, window: Range<usize>, emit: &mut impl FnMut(Range<usize>)) {
        let middle = &unit[window.clone()];
        let infix = match &self.infix {
            Some(infix) if !self.is_exception(middle) => infix,
            _ => {
                emit(window);
                return;
            }
        };

        let mut start = 0;
        for m in infix.find_iter(middle) {
            // An infix at the very start stays attached
            if m.start() == 0 || m.is_empty() {
                continue;
            }
            if m.start() != start {
                emit(window.start + start..window.start + m.start());
            }
            emit(window.start + m.start()..window.start + m.end());
            start = m.end();
        }
        if start < middle.len() {
            emit(window.start + start..window.end);
        }
    }

    /// Byte length of the prefix to split off, 0 if none
    fn find_prefix(&self, unit: &str) -> usize {
        if let Some(len) = self.code_at_start(unit) {
            return len;
        }

        let punctuation = self
            .prefix
            .as_ref()
            .and_then(|re| re.find(unit))
            .map(|m| m.end())
            .filter(|&len| len > 0);
        if let Some(len) = punctuation {
            return len;
        }

        self.glued_code_offset(unit).unwrap_or(0)
    }

    /// Byte offset where a trailing suffix starts
    fn find_suffix(&self, unit: &str) -> Option<usize> {
        self.suffix
            .as_ref()
            .and_then(|re| re.find(unit))
            .filter(|m| !m.is_empty())
            .map(|m| m.start())
    }

    /// Length of the longest component code at the start of `unit`
    fn code_at_start(&self, unit: &str) -> Option<usize> {
        self.codes
            .iter()
            .filter_map(|re| re.captures(unit))
            .filter_map(|caps| caps.name("code"))
            .map(|code| code.end())
            .max()
    }

    /// Offset of the first component code glued onto leading text
    fn glued_code_offset(&self, unit: &str) -> Option<usize> {
        if self.codes.is_empty() {
            return None;
        }
        unit.char_indices()
            .skip(1)
            .filter(|&(_, ch)| ch.is_ascii_uppercase() || GLUED_CODE_START.contains(ch))
            .map(|(offset, _)| offset)
            .find(|&offset| self.code_at_start(&unit[offset..]).is_some())
    }
}

/// Builder for [`BoundaryEngine`]
#[derive(Debug)]
pub struct BoundaryEngineBuilder<'a> {
    language: &'a LanguageConfig,
    prefixes: Vec<String>,
    suffixes: Vec<String>,
    infixes: Vec<String>,
    rules: Option<&'a RuleSet>,
}

impl<'a> BoundaryEngineBuilder<'a> {
    pub fn new(language: &'a LanguageConfig) -> Self {
        Self {
            language,
            prefixes: Vec::new(),
            suffixes: Vec::new(),
            infixes: Vec::new(),
            rules: None,
        }
    }

    /// Add prefix patterns on top of the language defaults
    pub fn prefixes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefixes.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Add suffix patterns on top of the language defaults
    pub fn suffixes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suffixes.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Add infix patterns on top of the language defaults
    pub fn infixes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.infixes.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Split component codes off as units of their own
    pub fn component_codes(mut self, rules: &'a RuleSet) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn build(self) -> Result<BoundaryEngine> {
        let tokenizer = &self.language.tokenizer;

        let prefix = alternation(tokenizer.prefixes.iter().chain(&self.prefixes))
            .map(|alt| Regex::new(&format!("^{alt}")))
            .transpose()?;
        let suffix = alternation(tokenizer.suffixes.iter().chain(&self.suffixes))
            .map(|alt| Regex::new(&format!("{alt}$")))
            .transpose()?;
        let infix = alternation(tokenizer.infixes.iter().chain(&self.infixes))
            .map(|alt| Regex::new(&alt))
            .transpose()?;

        let mut codes = Vec::new();
        if let Some(rules) = self.rules {
            let lookahead = Lookahead::new(&self.language.boundary.word_continuation)?;
            for rule in rules.iter() {
                let pattern = format!("^(?P<code>{}){}", rule.code_pattern(), lookahead.pattern());
                codes.push(Regex::new(&pattern)?);
            }
        }

        let exceptions = self.language.exceptions.literals.iter().cloned().collect();

        log::debug!(
            "boundary engine for '{}': {} prefix, {} suffix, {} infix patterns, {} code rules",
            self.language.metadata.code,
            tokenizer.prefixes.len() + self.prefixes.len(),
            tokenizer.suffixes.len() + self.suffixes.len(),
            tokenizer.infixes.len() + self.infixes.len(),
            codes.len()
        );

        Ok(BoundaryEngine {
            prefix,
            suffix,
            infix,
            codes,
            exceptions,
        })
    }
}

/// `(?:a|b|...)` over the fragments, `None` if there are none
fn alternation<'s>(fragments: impl Iterator<Item = &'s String>) -> Option<String> {
    let parts: Vec<String> = fragments.map(|f| format!("(?:{f})")).collect();
    if parts.is_empty() {
        None
    } else {
        Some(format!("(?:{})", parts.join("|")))
    }
}

/// Maximal runs of whitespace and non-whitespace, as byte ranges
fn runs(text: &str) -> Vec<(Range<usize>, bool)> {
    let mut runs = Vec::new();
    let mut current: Option<(usize, bool)> = None;

    for (offset, ch) in text.char_indices() {
        let is_whitespace = ch.is_whitespace();
        match current {
            Some((_, kind)) if kind == is_whitespace => {}
            Some((start, kind)) => {
                runs.push((start..offset, kind));
                current = Some((offset, is_whitespace));
            }
            None => current = Some((offset, is_whitespace)),
        }
    }
    if let Some((start, kind)) = current {
        runs.push((start..text.len(), kind));
    }

    runs
}

fn push_span(text: &str, spans: &mut Vec<Span>, bytes: Range<usize>) {
    let char_start = spans.last().map_or(0, |span| span.end);
    spans.push(Span::new(text, bytes, char_start));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::get_language_config;

    fn engine() -> BoundaryEngine {
        let language = get_language_config("de").unwrap();
        BoundaryEngine::for_components(language, &RuleSet::canonical()).unwrap()
    }

    fn texts(engine: &BoundaryEngine, text: &str) -> Vec<String> {
        engine
            .segment(text)
            .into_iter()
            .filter(|span| !span.is_whitespace())
            .map(|span| span.text)
            .collect()
    }

    #[test]
    fn test_glued_codes_are_split() {
        let engine = engine();
        assert_eq!(texts(&engine, "rpT2pN1M0"), vec!["rpT2", "pN1", "M0"]);
        assert_eq!(texts(&engine, "ypT0N0M0"), vec!["ypT0", "N0", "M0"]);
        assert_eq!(texts(&engine, "PN1"), vec!["P", "N1"]);
    }

    #[test]
    fn test_uppercase_words_ending_in_codes_are_split() {
        let engine = engine();
        assert_eq!(texts(&engine, "HER2 positiv"), vec!["HE", "R2", "positiv"]);
    }

    #[test]
    fn test_punctuation_before_codes() {
        let engine = engine();
        assert_eq!(texts(&engine, "§T1"), vec!["§", "T1"]);
        assert_eq!(texts(&engine, "(T1"), vec!["(", "T1"]);
        assert_eq!(texts(&engine, "/N0"), vec!["/", "N0"]);
        assert_eq!(texts(&engine, "pT1b,"), vec!["pT1b", ","]);
    }

    #[test]
    fn test_parenthetical_blocks_are_separable() {
        let engine = engine();
        assert_eq!(texts(&engine, "N1(1/2)"), vec!["N1", "(", "1/2", ")"]);
        assert_eq!(texts(&engine, "N0(i-)"), vec!["N0", "(", "i", "-", ")"]);
        assert_eq!(texts(&engine, "(sn)"), vec!["(", "sn", ")"]);
    }

    #[test]
    fn test_hyphen_splits_status_phrasing() {
        let engine = engine();
        assert_eq!(texts(&engine, "R-Status:"), vec!["R", "-", "Status", ":"]);
    }

    #[test]
    fn test_words_are_not_split() {
        let engine = engine();
        assert_eq!(texts(&engine, "Tissue"), vec!["Tissue"]);
        assert_eq!(texts(&engine, "Target"), vec!["Target"]);
        assert_eq!(texts(&engine, "Grading"), vec!["Grading"]);
        assert_eq!(texts(&engine, "pn1"), vec!["pn1"]);
    }

    #[test]
    fn test_exceptions_survive_affix_splitting() {
        let engine = engine();
        assert_eq!(texts(&engine, "(8. Aufl.):"), vec!["(", "8", ".", "Aufl.", ")", ":"]);
        assert_eq!(texts(&engine, "z.B."), vec!["z.B."]);
    }

    #[test]
    fn test_spans_partition_text() {
        let engine = engine();
        let text = "TNM (8. Aufl.): pT1b, pNX\n  über  G2 ";
        let spans = engine.segment(text);

        let joined: String = spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(joined, text);
        let mut expected_start = 0;
        for span in &spans {
            assert_eq!(span.start, expected_start);
            assert_eq!(span.end, span.start + span.text.chars().count());
            assert_eq!(&text[span.byte_range()], span.text);
            expected_start = span.end;
        }
        assert_eq!(expected_start, text.chars().count());
    }

    #[test]
    fn test_empty_text() {
        assert!(engine().segment("").is_empty());
    }

    #[test]
    fn test_extra_rules_without_codes() {
        let language = get_language_config("de").unwrap();
        let engine = BoundaryEngine::builder(language)
            .prefixes(["/"])
            .infixes(["/"])
            .suffixes(["/"])
            .build()
            .unwrap();
        assert_eq!(texts(&engine, "1234/3,"), vec!["1234", "/", "3", ","]);
        // No code rules, so codes stay glued to surrounding text
        assert_eq!(texts(&engine, "PN1"), vec!["PN1"]);
    }

    #[test]
    fn test_invalid_extra_pattern() {
        let language = get_language_config("de").unwrap();
        let result = BoundaryEngine::builder(language).infixes(["("]).build();
        assert!(result.is_err());
    }
}
