//! TNM component model: kinds, modifiers, details and structured matches

use crate::error::CoreError;
use crate::span::Span;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of TNM components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentKind {
    /// Primary tumor
    T,
    /// Regional lymph nodes
    N,
    /// Distant metastasis
    M,
    /// Lymphatic invasion
    L,
    /// Venous invasion
    V,
    /// Perineural invasion
    Pn,
    /// Serum tumor markers / staging uncertainty
    SX,
    /// Residual tumor
    R,
    /// Histopathological grading
    G,
}

impl ComponentKind {
    /// Number of component kinds
    pub const COUNT: usize = 9;

    /// All kinds in canonical order
    pub const ALL: [ComponentKind; Self::COUNT] = [
        ComponentKind::T,
        ComponentKind::N,
        ComponentKind::M,
        ComponentKind::L,
        ComponentKind::V,
        ComponentKind::Pn,
        ComponentKind::SX,
        ComponentKind::R,
        ComponentKind::G,
    ];

    /// Position of this kind in [`ComponentKind::ALL`]
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Name of the component as used in records and output
    pub fn code(self) -> &'static str {
        match self {
            ComponentKind::T => "T",
            ComponentKind::N => "N",
            ComponentKind::M => "M",
            ComponentKind::L => "L",
            ComponentKind::V => "V",
            ComponentKind::Pn => "Pn",
            ComponentKind::SX => "SX",
            ComponentKind::R => "R",
            ComponentKind::G => "G",
        }
    }

    /// Letter(s) that open the code in clinical text
    pub fn letter(self) -> &'static str {
        match self {
            ComponentKind::SX => "S",
            other => other.code(),
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ComponentKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentKind::ALL
            .into_iter()
            .find(|kind| kind.code() == s)
            .ok_or_else(|| CoreError::UnknownComponent(s.to_string()))
    }
}

/// Single-letter modifier preceding a component code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modifier {
    /// Post-neoadjuvant (`y`)
    #[serde(rename = "y")]
    Neoadjuvant,
    /// Recurrence (`r`)
    #[serde(rename = "r")]
    Recurrence,
    /// Autopsy (`a`)
    #[serde(rename = "a")]
    Autopsy,
    /// Ultrasound (`u`)
    #[serde(rename = "u")]
    Ultrasound,
    /// Pathological (`p`)
    #[serde(rename = "p")]
    Pathological,
    /// Clinical (`c`)
    #[serde(rename = "c")]
    Clinical,
}

impl Modifier {
    /// History modifiers in the order they appear in a prefix
    pub const HISTORY: [Modifier; 3] = [
        Modifier::Neoadjuvant,
        Modifier::Recurrence,
        Modifier::Autopsy,
    ];

    /// Assessment modifiers
    pub const ASSESSMENT: [Modifier; 3] = [
        Modifier::Ultrasound,
        Modifier::Pathological,
        Modifier::Clinical,
    ];

    /// The letter written in clinical text
    pub fn as_char(self) -> char {
        match self {
            Modifier::Neoadjuvant => 'y',
            Modifier::Recurrence => 'r',
            Modifier::Autopsy => 'a',
            Modifier::Ultrasound => 'u',
            Modifier::Pathological => 'p',
            Modifier::Clinical => 'c',
        }
    }

    /// Parse a modifier letter
    pub fn from_char(ch: char) -> Option<Self> {
        Self::HISTORY
            .into_iter()
            .chain(Self::ASSESSMENT)
            .find(|m| m.as_char() == ch)
    }

    /// Whether this modifier belongs to the history alphabet
    pub fn is_history(self) -> bool {
        Self::HISTORY.contains(&self)
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Structured and free-text annotations attached to a component
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DetailMap {
    /// Number of affected lymph nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lymphnodes_affected: Option<u32>,
    /// Number of examined lymph nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lymphnodes_examined: Option<u32>,
    /// Remaining parenthetical text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other: Option<String>,
}

impl DetailMap {
    /// Whether no key is set
    pub fn is_empty(&self) -> bool {
        self.lymphnodes_affected.is_none()
            && self.lymphnodes_examined.is_none()
            && self.other.is_none()
    }
}

/// A fully processed component occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentMatch {
    /// Which component this is
    pub kind: ComponentKind,
    /// Entire matched region, prefixes and parenthetical suffix included
    pub span: Span,
    /// Modifier prefixes in source order
    pub prefixes: Vec<Modifier>,
    /// Canonical code, e.g. `T1b` or `Pn0`
    pub value: String,
    /// Extracted details
    #[serde(default, skip_serializing_if = "DetailMap::is_empty")]
    pub details: DetailMap,
}

impl ComponentMatch {
    /// The covered source text
    pub fn token(&self) -> &str {
        &self.span.text
    }

    /// Character offset where the match starts
    pub fn start(&self) -> usize {
        self.span.start
    }

    /// Character offset where the match ends
    pub fn end(&self) -> usize {
        self.span.end
    }

    /// Whether this match's span contains `other`'s span
    pub fn contains(&self, other: &ComponentMatch) -> bool {
        self.span.contains(&other.span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes_roundtrip_through_from_str() {
        for kind in ComponentKind::ALL {
            assert_eq!(kind.code().parse::<ComponentKind>().unwrap(), kind);
        }
        assert_eq!(ComponentKind::SX.letter(), "S");
        assert_eq!(ComponentKind::Pn.letter(), "Pn");
    }

    #[test]
    fn test_unknown_kind() {
        match "Q".parse::<ComponentKind>() {
            Err(CoreError::UnknownComponent(code)) => assert_eq!(code, "Q"),
            other => panic!("Expected UnknownComponent, got {other:?}"),
        }
    }

    #[test]
    fn test_kind_index_matches_all_order() {
        for (i, kind) in ComponentKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_modifier_alphabets() {
        assert_eq!(Modifier::from_char('y'), Some(Modifier::Neoadjuvant));
        assert_eq!(Modifier::from_char('p'), Some(Modifier::Pathological));
        assert_eq!(Modifier::from_char('x'), None);
        assert!(Modifier::Autopsy.is_history());
        assert!(!Modifier::Clinical.is_history());
    }

    #[test]
    fn test_details_serialization_omits_unset_keys() {
        let details = DetailMap {
            lymphnodes_affected: Some(5),
            lymphnodes_examined: Some(13),
            other: None,
        };
        let json = serde_json::to_string(&details).unwrap();
        assert_eq!(json, r#"{"lymphnodes_affected":5,"lymphnodes_examined":13}"#);
        assert!(DetailMap::default().is_empty());
    }

    #[test]
    fn test_modifier_serializes_as_letter() {
        let json = serde_json::to_string(&vec![Modifier::Neoadjuvant, Modifier::Pathological])
            .unwrap();
        assert_eq!(json, r#"["y","p"]"#);
    }
}
