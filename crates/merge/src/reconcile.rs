use crate::similarity::is_similar;
use extract::RelationRecord;

/// Tokens marking a counterparty as non-specific. A name containing any
/// of these (case-insensitive) is dropped before deduplication.
const PLACEHOLDER_TOKENS: &[&str] = &[
    "불명",
    "미상",
    "협력업체",
    "기타",
    "unclear",
    "unspecified",
    "various",
    "partners",
    "etc",
];

pub fn is_placeholder(counterparty: &str) -> bool {
    let lowered = counterparty.trim().to_lowercase();
    if lowered.is_empty() {
        return true;
    }
    PLACEHOLDER_TOKENS.iter().any(|token| lowered.contains(token))
}

/// Filter-then-deduplicate the pooled record set for one company.
///
/// Records are visited in the given order; a candidate is a duplicate of
/// an already-kept record when relation kind and subcategory match
/// exactly and the counterparty names are similar at the threshold. The
/// earliest mention of each relationship survives, so which variant of a
/// name wins depends on input order; that one survives is invariant.
pub fn reconcile(records: Vec<RelationRecord>, threshold: f64) -> Vec<RelationRecord> {
    let mut kept: Vec<RelationRecord> = Vec::new();

    for record in records {
        if record.company_name.trim().is_empty() {
            continue;
        }
        if is_placeholder(&record.counterparty) {
            continue;
        }

        let duplicate = kept.iter().any(|existing| {
            existing.kind == record.kind
                && existing.subcategory == record.subcategory
                && is_similar(&existing.counterparty, &record.counterparty, threshold)
        });

        if !duplicate {
            kept.push(record);
        }
    }

    kept
}
