//! Template matching over the span stream

use crate::component::ComponentKind;
use crate::error::Result;
use crate::rules::{ComponentRule, RuleSet};
use crate::span::Span;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Optional parenthetical block after a code
const DETAIL_PATTERN: &str = r"\s*\([^()]+\)";

/// The template that produced a raw match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Prefix, letter and value in one unit
    Bare,
    /// Code followed by a parenthetical block
    Parenthetical,
    /// Letter and value separated by whitespace
    Spaced,
    /// `<letter>-Status <value>` phrasing
    Status,
}

/// Switches for the optional templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatcherOptions {
    pub allow_spaces: bool,
    pub detect_parentheses: bool,
}

impl Default for MatcherOptions {
    fn default() -> Self {
        Self {
            allow_spaces: false,
            detect_parentheses: true,
        }
    }
}

/// A component occurrence before post-processing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
    pub kind: ComponentKind,
    pub span: Span,
    pub variant: Variant,
}

impl RawMatch {
    /// The captured text
    pub fn text(&self) -> &str {
        &self.span.text
    }
}

#[derive(Debug, Clone)]
struct Template {
    kind: ComponentKind,
    variant: Variant,
    regex: Regex,
}

/// Finds component templates at span starts
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    templates: Vec<Template>,
}

impl PatternMatcher {
    pub fn new(rules: &RuleSet, options: MatcherOptions) -> Result<Self> {
        let mut templates = Vec::new();
        for rule in rules.iter() {
            for (variant, pattern) in template_patterns(rule, options) {
                templates.push(Template {
                    kind: rule.kind,
                    variant,
                    regex: Regex::new(&format!("^{pattern}"))?,
                });
            }
        }

        log::debug!(
            "pattern matcher: {} templates for {} rules (spaces: {}, parentheses: {})",
            templates.len(),
            rules.len(),
            options.allow_spaces,
            options.detect_parentheses
        );

        Ok(Self { templates })
    }

    /// Number of compiled templates
    pub fn template_count(&self) -> usize {
        self.templates.len()
    }

    /// Find all component matches in `text`, which `spans` segment
    ///
    /// A match starts at a span start, and both its code and its full extent
    /// end on span ends. Per kind and start only the longest template wins,
    /// and a match inside an earlier match of the same kind is dropped. The
    /// result is ordered by start, then by component order.
    pub fn find_matches(&self, text: &str, spans: &[Span]) -> Vec<RawMatch> {
        let ends: Vec<usize> = spans.iter().map(Span::byte_end).collect();
        let is_boundary = |offset: usize| ends.binary_search(&offset).is_ok();

        let mut matches = Vec::new();
        let mut covered_until = [0usize; ComponentKind::COUNT];

        for span in spans.iter().filter(|span| !span.is_whitespace()) {
            let haystack = &text[span.byte_start..];
            let mut best: [Option<(usize, Variant)>; ComponentKind::COUNT] =
                [None; ComponentKind::COUNT];

            for template in &self.templates {
                let Some(caps) = template.regex.captures(haystack) else {
                    continue;
                };
                let code_end = caps.name("code").map_or(0, |m| m.end());
                let end = caps.get(0).map_or(0, |m| m.end());
                if end == 0
                    || !is_boundary(span.byte_start + code_end)
                    || !is_boundary(span.byte_start + end)
                {
                    continue;
                }

                let slot = &mut best[template.kind.index()];
                if slot.map_or(true, |(len, _)| end > len) {
                    *slot = Some((end, template.variant));
                }
            }

            for kind in ComponentKind::ALL {
                let Some((len, variant)) = best[kind.index()] else {
                    continue;
                };
                let end = span.byte_start + len;
                if end <= covered_until[kind.index()] {
                    continue;
                }
                covered_until[kind.index()] = end;
                matches.push(RawMatch {
                    kind,
                    span: Span::new(text, span.byte_start..end, span.start),
                    variant,
                });
            }
        }

        log::trace!("{} raw matches over {} spans", matches.len(), spans.len());
        matches
    }
}

/// Template regexes for one rule, without the leading anchor
fn template_patterns(rule: &ComponentRule, options: MatcherOptions) -> Vec<(Variant, String)> {
    let prefix = rule.prefix.pattern();
    let letter = rule.letter_pattern();
    let values = rule.value_pattern();

    let bare = format!("(?P<code>{})", rule.code_pattern());
    let mut patterns = vec![(Variant::Bare, bare.clone())];

    let spaced = format!(r"(?P<code>{prefix}{letter}\s*{values})");
    if options.allow_spaces {
        patterns.push((Variant::Spaced, spaced.clone()));
    }
    if options.detect_parentheses {
        patterns.push((Variant::Parenthetical, format!("{bare}{DETAIL_PATTERN}")));
        if options.allow_spaces {
            patterns.push((Variant::Spaced, format!("{spaced}{DETAIL_PATTERN}")));
        }
    }

    if rule.status_phrasing {
        let status = format!(r"(?P<code>{letter}-(?i:status):?\s*(?:{letter})?{values})");
        if options.detect_parentheses {
            patterns.push((Variant::Status, format!("{status}{DETAIL_PATTERN}")));
        }
        patterns.push((Variant::Status, status));
    }

    patterns
}
