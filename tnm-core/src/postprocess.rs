//! Turning raw matches into structured component matches

use crate::component::{ComponentKind, ComponentMatch, DetailMap};
use crate::error::Result;
use crate::matcher::{RawMatch, Variant};
use crate::rules::{PrefixGrammar, RuleSet};
use regex::Regex;

/// Splits prefixes, extracts details and normalizes values
#[derive(Debug, Clone)]
pub struct PostProcessor {
    grammars: [PrefixGrammar; ComponentKind::COUNT],
    /// Trailing value of status phrasing, per kind
    status_values: [Option<Regex>; ComponentKind::COUNT],
    fraction: Regex,
    detail: Regex,
}

impl PostProcessor {
    pub fn new(rules: &RuleSet) -> Result<Self> {
        let mut grammars = [PrefixGrammar::NONE; ComponentKind::COUNT];
        let mut status_values: [Option<Regex>; ComponentKind::COUNT] = Default::default();

        for rule in rules.iter() {
            grammars[rule.kind.index()] = rule.prefix;
            if rule.status_phrasing {
                let pattern = format!("{}$", rule.value_pattern());
                status_values[rule.kind.index()] = Some(Regex::new(&pattern)?);
            }
        }

        Ok(Self {
            grammars,
            status_values,
            fraction: Regex::new(r"(\d+)(?:\s*/\s*|\s+)(\d+)")?,
            detail: Regex::new(r"\s*\(([^()]*)\)")?,
        })
    }

    pub fn process(&self, raw: RawMatch) -> ComponentMatch {
        let RawMatch {
            kind,
            span,
            variant,
        } = raw;

        let (prefixes, rest) = if variant == Variant::Status {
            (Vec::new(), span.text.as_str())
        } else {
            self.grammars[kind.index()].split(&span.text)
        };
        let mut value = rest.to_string();
        let mut details = DetailMap::default();

        let block = self
            .detail
            .captures(&value)
            .and_then(|caps| Some((caps.get(1)?.as_str().to_string(), caps.get(0)?.range())));
        if let Some((mut inner, range)) = block {
            if kind == ComponentKind::N {
                self.extract_lymph_nodes(&mut inner, &mut details);
            }
            let other = inner
                .trim_matches(|ch: char| ch == ',' || ch == ';' || ch.is_whitespace())
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ");
            if !other.is_empty() {
                details.other = Some(other);
            }
            value.replace_range(range, "");
        }

        let value = match &self.status_values[kind.index()] {
            Some(trailing) if variant == Variant::Status => trailing
                .find(value.trim_end())
                .map(|m| format!("{}{}", kind.letter(), m.as_str()))
                .unwrap_or_else(|| strip_whitespace(&value)),
            _ => strip_whitespace(&value),
        };

        ComponentMatch {
            kind,
            span,
            prefixes,
            value,
            details,
        }
    }

    /// Move an `affected/examined` fraction from a parenthetical into `details`
    ///
    /// The slash may be left out (`1 2`), but two numbers always need some
    /// separator so that `12` is not read as one of two.
    fn extract_lymph_nodes(&self, inner: &mut String, details: &mut DetailMap) {
        // Counts that do not fit stay in the text and end up as free text
        let fraction = self.fraction.captures(inner.as_str()).and_then(|caps| {
            let affected = caps.get(1)?.as_str().parse::<u32>().ok()?;
            let examined = caps.get(2)?.as_str().parse::<u32>().ok()?;
            Some((affected, examined, caps.get(0)?.range()))
        });
        if let Some((affected, examined, range)) = fraction {
            details.lymphnodes_affected = Some(affected);
            details.lymphnodes_examined = Some(examined);
            inner.replace_range(range, "");
        }
    }
}

fn strip_whitespace(value: &str) -> String {
    value.chars().filter(|ch| !ch.is_whitespace()).collect()
}
