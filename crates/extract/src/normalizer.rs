use crate::schema::{ExtractionResult, RelationKind, RelationRecord, SourceTag};

/// Flatten one extraction outcome into relation records: the industry
/// fans out to every row, suppliers become Supplier rows and buyers
/// Buyer rows, one record per extracted entry. Failures normalize to an
/// empty set; the ledger handles them separately.
pub fn normalize(
    company_name: &str,
    result: &ExtractionResult,
    source: SourceTag,
) -> Vec<RelationRecord> {
    let ExtractionResult::Success { payload, .. } = result else {
        return Vec::new();
    };

    let mut records = Vec::with_capacity(payload.suppliers.len() + payload.buyers.len());

    for (kind, entries) in [
        (RelationKind::Supplier, &payload.suppliers),
        (RelationKind::Buyer, &payload.buyers),
    ] {
        for entry in entries {
            records.push(RelationRecord {
                company_name: company_name.to_string(),
                industry: payload.industry.clone(),
                kind,
                subcategory: entry.category.clone(),
                counterparty: entry.company.clone(),
                source,
            });
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ExtractionPayload, FailureReason, RelationEntry};

    fn success(payload: ExtractionPayload) -> ExtractionResult {
        ExtractionResult::Success {
            payload,
            raw_excerpt: String::new(),
        }
    }

    #[test]
    fn test_suppliers_and_buyers_map_to_kinds() {
        let payload = ExtractionPayload {
            industry: "철강".to_string(),
            suppliers: vec![RelationEntry {
                category: "원재료".to_string(),
                company: "POSCO".to_string(),
            }],
            buyers: vec![RelationEntry {
                category: "자동차 부품".to_string(),
                company: "현대모비스".to_string(),
            }],
        };

        let records = normalize("테스트기업", &success(payload), SourceTag::Llm);
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].kind, RelationKind::Supplier);
        assert_eq!(records[0].counterparty, "POSCO");
        assert_eq!(records[0].industry, "철강");

        assert_eq!(records[1].kind, RelationKind::Buyer);
        assert_eq!(records[1].subcategory, "자동차 부품");
        assert_eq!(records[1].company_name, "테스트기업");
    }

    #[test]
    fn test_failure_normalizes_to_empty() {
        let failure = ExtractionResult::Failure {
            reason: FailureReason::Exhausted,
        };
        assert!(normalize("테스트기업", &failure, SourceTag::Llm).is_empty());
    }
}
