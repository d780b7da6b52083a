//! Per-component matching rules
//!
//! A [`RuleSet`] is built once, validated, and then shared read-only by the
//! boundary engine, the pattern matcher and the post-processor.

mod lookahead;
mod prefix;

pub use lookahead::Lookahead;
pub use prefix::PrefixGrammar;

use crate::component::ComponentKind;
use crate::error::{CoreError, Result};
use regex::Regex;

/// Prefix and value grammar for one component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRule {
    pub kind: ComponentKind,
    pub prefix: PrefixGrammar,
    /// Regex fragment for the code suffix after the component letter
    pub values: String,
    /// Whether `<letter>-Status[:] <value>` phrasing is recognized
    pub status_phrasing: bool,
}

impl ComponentRule {
    pub fn new(kind: ComponentKind, prefix: PrefixGrammar, values: &str) -> Self {
        Self {
            kind,
            prefix,
            values: values.to_string(),
            status_phrasing: false,
        }
    }

    /// Enable status-indicator phrasing for this component
    pub fn with_status_phrasing(mut self) -> Self {
        self.status_phrasing = true;
        self
    }

    /// Escaped component letter(s)
    pub fn letter_pattern(&self) -> String {
        regex::escape(self.kind.letter())
    }

    /// The value grammar as a non-capturing group
    pub fn value_pattern(&self) -> String {
        format!("(?:{})", self.values)
    }

    /// Prefix, letter and value without whitespace in between
    pub fn code_pattern(&self) -> String {
        format!(
            "{}{}{}",
            self.prefix.pattern(),
            self.letter_pattern(),
            self.value_pattern()
        )
    }
}

/// The complete, immutable rule table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<ComponentRule>,
}

impl RuleSet {
    /// Build a rule set, checking that each component appears once and every
    /// value grammar compiles
    pub fn new(rules: Vec<ComponentRule>) -> Result<Self> {
        for (i, rule) in rules.iter().enumerate() {
            if rules[..i].iter().any(|other| other.kind == rule.kind) {
                return Err(CoreError::Configuration(format!(
                    "duplicate rule for component {}",
                    rule.kind
                )));
            }
            if rule.values.is_empty() {
                return Err(CoreError::Configuration(format!(
                    "empty value grammar for component {}",
                    rule.kind
                )));
            }
            Regex::new(&rule.code_pattern())?;
        }
        Ok(Self { rules })
    }

    /// The canonical TNM rule table
    pub fn canonical() -> Self {
        use ComponentKind::*;

        let rules = vec![
            ComponentRule::new(T, PrefixGrammar::FULL, "[0-4][a-d]?|is|a|[Xx]"),
            ComponentRule::new(N, PrefixGrammar::FULL, "[0-3][a-d]?|[Xx]"),
            ComponentRule::new(M, PrefixGrammar::FULL, "[0-1][a-b]?|[Xx]"),
            ComponentRule::new(L, PrefixGrammar::ASSESSMENT, "[0-1Xx]").with_status_phrasing(),
            ComponentRule::new(V, PrefixGrammar::ASSESSMENT, "[0-2Xx]").with_status_phrasing(),
            ComponentRule::new(Pn, PrefixGrammar::ASSESSMENT, "[0-1Xx]").with_status_phrasing(),
            ComponentRule::new(SX, PrefixGrammar::NONE, "[0-3Xx]"),
            ComponentRule::new(R, PrefixGrammar::ASSESSMENT, "[0-2][a-b]?").with_status_phrasing(),
            ComponentRule::new(G, PrefixGrammar::NONE, "[1-4Xx]"),
        ];

        Self { rules }
    }

    /// Rule for a component, if present
    pub fn get(&self, kind: ComponentKind) -> Option<&ComponentRule> {
        self.rules.iter().find(|rule| rule.kind == kind)
    }

    /// Rules in table order
    pub fn iter(&self) -> impl Iterator<Item = &ComponentRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::canonical()
    }
}
