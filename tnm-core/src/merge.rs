//! Folding adjacent compatible records together

use crate::component::{ComponentKind, ComponentMatch};
use crate::record::ClassificationRecord;

/// Left fold over `records`, merging each record into the accumulator when
/// every shared component is compatible
pub fn merge_records(records: Vec<ClassificationRecord>) -> Vec<ClassificationRecord> {
    let mut merged = Vec::with_capacity(records.len());
    let mut records = records.into_iter();
    let Some(mut accumulator) = records.next() else {
        return merged;
    };

    for next in records {
        match merge_pair(&accumulator, &next) {
            Some(combined) => accumulator = combined,
            None => merged.push(std::mem::replace(&mut accumulator, next)),
        }
    }
    merged.push(accumulator);

    log::trace!("merge pass produced {} records", merged.len());
    merged
}

/// Merge two records, or `None` if any shared component conflicts
pub fn merge_pair(
    left: &ClassificationRecord,
    right: &ClassificationRecord,
) -> Option<ClassificationRecord> {
    let mut combined = ClassificationRecord::new();
    for kind in ComponentKind::ALL {
        let component = match (left.get(kind), right.get(kind)) {
            (None, None) => continue,
            (Some(only), None) | (None, Some(only)) => only.clone(),
            (Some(a), Some(b)) => merge_components(a, b)?,
        };
        combined.put(component);
    }
    combined.set_merged(true);
    Some(combined)
}

/// Two matches of one kind agree when the values are equal and prefixes and
/// details are equal or missing on one side
fn merge_components(a: &ComponentMatch, b: &ComponentMatch) -> Option<ComponentMatch> {
    let prefixes_agree = a.prefixes == b.prefixes || a.prefixes.is_empty() || b.prefixes.is_empty();
    let details_agree = a.details == b.details || a.details.is_empty() || b.details.is_empty();
    if a.value != b.value || !prefixes_agree || !details_agree {
        return None;
    }

    let (base, other) = if a.prefixes.is_empty() && !b.prefixes.is_empty() {
        (b, a)
    } else {
        (a, b)
    };
    let mut component = base.clone();
    if component.details.is_empty() {
        component.details = other.details.clone();
    }
    Some(component)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{DetailMap, Modifier};
    use crate::span::Span;

    fn component(
        kind: ComponentKind,
        source: &str,
        start: usize,
        prefixes: Vec<Modifier>,
        value: &str,
    ) -> ComponentMatch {
        let end = start + prefixes.len() + value.len();
        ComponentMatch {
            kind,
            span: Span::new(source, start..end, start),
            prefixes,
            value: value.to_string(),
            details: DetailMap::default(),
        }
    }

    fn record(components: Vec<ComponentMatch>) -> ClassificationRecord {
        let mut record = ClassificationRecord::new();
        for c in components {
            record.insert(c).unwrap();
        }
        record
    }

    const SOURCE: &str = "R0 T-Status T2 pT2 N0";

    #[test]
    fn test_compatible_records_merge() {
        let first = record(vec![
            component(ComponentKind::R, SOURCE, 0, vec![], "R0"),
            component(ComponentKind::T, SOURCE, 12, vec![], "T2"),
        ]);
        let second = record(vec![
            component(ComponentKind::T, SOURCE, 15, vec![Modifier::Pathological], "T2"),
            component(ComponentKind::N, SOURCE, 19, vec![], "N0"),
        ]);

        let merged = merge_records(vec![first, second]);
        assert_eq!(merged.len(), 1);
        let record = &merged[0];
        assert!(record.is_merged());
        assert_eq!(record.len(), 3);
        let t = record.get(ComponentKind::T).unwrap();
        assert_eq!(t.prefixes, vec![Modifier::Pathological]);
        assert_eq!(t.start(), 15);
    }

    #[test]
    fn test_conflicting_values_stay_apart() {
        let source = "T1 T2";
        let first = record(vec![component(ComponentKind::T, source, 0, vec![], "T1")]);
        let second = record(vec![component(ComponentKind::T, source, 3, vec![], "T2")]);

        let merged = merge_records(vec![first.clone(), second.clone()]);
        assert_eq!(merged, vec![first, second]);
        assert!(!merged[0].is_merged());
    }

    #[test]
    fn test_conflicting_prefixes_stay_apart() {
        let source = "cT2 pT2";
        let first = record(vec![component(ComponentKind::T, source, 0, vec![Modifier::Clinical], "T2")]);
        let second = record(vec![component(
            ComponentKind::T,
            source,
            4,
            vec![Modifier::Pathological],
            "T2",
        )]);
        assert!(merge_pair(&first, &second).is_none());
    }

    #[test]
    fn test_details_filled_from_other_side() {
        let source = "N1 (1/2) N1";
        let mut with_details = component(ComponentKind::N, source, 0, vec![], "N1");
        with_details.details.lymphnodes_affected = Some(1);
        with_details.details.lymphnodes_examined = Some(2);
        let first = record(vec![component(ComponentKind::N, source, 9, vec![], "N1")]);
        let second = record(vec![with_details.clone()]);

        let merged = merge_pair(&first, &second).unwrap();
        assert_eq!(merged.get(ComponentKind::N).unwrap().details, with_details.details);
    }

    #[test]
    fn test_fold_flushes_on_failure() {
        let source = "T1 N0 T2 M0";
        let records = vec![
            record(vec![component(ComponentKind::T, source, 0, vec![], "T1")]),
            record(vec![component(ComponentKind::N, source, 3, vec![], "N0")]),
            record(vec![component(ComponentKind::T, source, 6, vec![], "T2")]),
            record(vec![component(ComponentKind::M, source, 9, vec![], "M0")]),
        ];

        let merged = merge_records(records);
        assert_eq!(merged.len(), 2);
        assert!(merged.iter().all(ClassificationRecord::is_merged));
        assert_eq!(merged[0].get(ComponentKind::T).unwrap().value, "T1");
        assert_eq!(merged[1].get(ComponentKind::T).unwrap().value, "T2");
    }

    #[test]
    fn test_single_record_keeps_flag() {
        let only = record(vec![component(ComponentKind::G, "G2", 0, vec![], "G2")]);
        let merged = merge_records(vec![only]);
        assert_eq!(merged.len(), 1);
        assert!(!merged[0].is_merged());
        assert!(merge_records(Vec::new()).is_empty());
    }
}
