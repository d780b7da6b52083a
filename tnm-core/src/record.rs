//! Classification records: one staging statement, at most one match per component

use crate::component::{ComponentKind, ComponentMatch};
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single TNM staging statement found in a document
///
/// Slots are indexed by [`ComponentKind`], so every kind appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "RecordRepr", from = "RecordRepr")]
pub struct ClassificationRecord {
    slots: [Option<ComponentMatch>; ComponentKind::COUNT],
    merged: bool,
}

impl ClassificationRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// The match stored for `kind`
    #[inline]
    pub fn get(&self, kind: ComponentKind) -> Option<&ComponentMatch> {
        self.slots[kind.index()].as_ref()
    }

    /// Look up a slot by its component code (`"T"`, `"Pn"`, ...)
    pub fn component(&self, code: &str) -> Result<Option<&ComponentMatch>> {
        let kind: ComponentKind = code.parse()?;
        Ok(self.get(kind))
    }

    /// Whether `candidate` may be written into its slot
    ///
    /// True when the slot is empty or the candidate's span contains the stored match.
    pub fn accepts(&self, candidate: &ComponentMatch) -> bool {
        match self.get(candidate.kind) {
            None => true,
            Some(existing) => candidate.contains(existing),
        }
    }

    /// Store a match, replacing a stored match that it contains
    ///
    /// Returns the replaced match, if any.
    pub fn insert(&mut self, candidate: ComponentMatch) -> Result<Option<ComponentMatch>> {
        if !self.accepts(&candidate) {
            return Err(CoreError::InvalidState {
                kind: candidate.kind,
            });
        }
        let index = candidate.kind.index();
        Ok(self.slots[index].replace(candidate))
    }

    /// Whether no slot is filled
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Number of filled slots
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Filled slots in canonical component order
    pub fn iter(&self) -> impl Iterator<Item = &ComponentMatch> {
        self.slots.iter().flatten()
    }

    /// Kinds with a stored match
    pub fn kinds(&self) -> impl Iterator<Item = ComponentKind> + '_ {
        self.iter().map(|m| m.kind)
    }

    /// Whether this record was produced by folding several records together
    pub fn is_merged(&self) -> bool {
        self.merged
    }

    /// Write a slot without the containment check
    pub(crate) fn put(&mut self, m: ComponentMatch) {
        let index = m.kind.index();
        self.slots[index] = Some(m);
    }

    pub(crate) fn set_merged(&mut self, merged: bool) {
        self.merged = merged;
    }

    /// Character offset of the earliest stored match
    pub fn start(&self) -> Option<usize> {
        self.iter().map(ComponentMatch::start).min()
    }
}

#[derive(Serialize, Deserialize)]
struct RecordRepr {
    #[serde(flatten)]
    components: BTreeMap<ComponentKind, ComponentMatch>,
    #[serde(default)]
    merged: bool,
}

impl From<ClassificationRecord> for RecordRepr {
    fn from(record: ClassificationRecord) -> Self {
        let merged = record.merged;
        let components = record
            .slots
            .into_iter()
            .flatten()
            .map(|m| (m.kind, m))
            .collect();
        Self { components, merged }
    }
}

impl From<RecordRepr> for ClassificationRecord {
    fn from(repr: RecordRepr) -> Self {
        let mut record = ClassificationRecord {
            merged: repr.merged,
            ..Default::default()
        };
        for (kind, m) in repr.components {
            record.slots[kind.index()] = Some(m);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::DetailMap;
    use crate::span::Span;

    fn component(kind: ComponentKind, source: &str, start: usize, end: usize) -> ComponentMatch {
        let span = Span::new(source, start..end, start);
        ComponentMatch {
            kind,
            value: span.text.split_whitespace().next().unwrap_or_default().to_string(),
            span,
            prefixes: Vec::new(),
            details: DetailMap::default(),
        }
    }

    #[test]
    fn test_insert_into_empty_slot() {
        let mut record = ClassificationRecord::new();
        assert!(record.is_empty());

        let replaced = record.insert(component(ComponentKind::T, "T1 N0", 0, 2)).unwrap();
        assert!(replaced.is_none());
        assert_eq!(record.len(), 1);
        assert_eq!(record.get(ComponentKind::T).unwrap().value, "T1");
    }

    #[test]
    fn test_containing_match_replaces() {
        let source = "N1 (1/2)";
        let mut record = ClassificationRecord::new();
        record.insert(component(ComponentKind::N, source, 0, 2)).unwrap();

        let replaced = record.insert(component(ComponentKind::N, source, 0, 8)).unwrap();
        assert_eq!(replaced.unwrap().end(), 2);
        assert_eq!(record.get(ComponentKind::N).unwrap().end(), 8);
    }

    #[test]
    fn test_non_containing_overwrite_is_invalid_state() {
        let source = "T1 T2";
        let mut record = ClassificationRecord::new();
        record.insert(component(ComponentKind::T, source, 0, 2)).unwrap();

        match record.insert(component(ComponentKind::T, source, 3, 5)) {
            Err(CoreError::InvalidState { kind }) => assert_eq!(kind, ComponentKind::T),
            other => panic!("Expected InvalidState, got {other:?}"),
        }
        assert_eq!(record.get(ComponentKind::T).unwrap().start(), 0);
    }

    #[test]
    fn test_component_by_code() {
        let mut record = ClassificationRecord::new();
        record.insert(component(ComponentKind::Pn, "Pn0", 0, 3)).unwrap();

        assert!(record.component("Pn").unwrap().is_some());
        assert!(record.component("G").unwrap().is_none());
        assert!(matches!(
            record.component("X"),
            Err(CoreError::UnknownComponent(_))
        ));
    }

    #[test]
    fn test_iteration_follows_canonical_order() {
        let source = "G2 N0 T1";
        let mut record = ClassificationRecord::new();
        record.insert(component(ComponentKind::G, source, 0, 2)).unwrap();
        record.insert(component(ComponentKind::N, source, 3, 5)).unwrap();
        record.insert(component(ComponentKind::T, source, 6, 8)).unwrap();

        let kinds: Vec<_> = record.kinds().collect();
        assert_eq!(
            kinds,
            vec![ComponentKind::T, ComponentKind::N, ComponentKind::G]
        );
        assert_eq!(record.start(), Some(0));
    }

    #[test]
    fn test_serde_shape() {
        let mut record = ClassificationRecord::new();
        record.insert(component(ComponentKind::T, "T1", 0, 2)).unwrap();

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["T"]["value"], "T1");
        assert_eq!(json["merged"], false);

        let back: ClassificationRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back.get(ComponentKind::T).unwrap().value, "T1");
    }
}
