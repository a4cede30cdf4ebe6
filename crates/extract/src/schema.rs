use serde::{Deserialize, Serialize};

/// One supplier or buyer mention as the model emits it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationEntry {
    pub category: String,
    pub company: String,
}

/// The JSON object the model is asked to produce.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionPayload {
    #[serde(default = "default_industry")]
    pub industry: String,
    #[serde(default)]
    pub suppliers: Vec<RelationEntry>,
    #[serde(default)]
    pub buyers: Vec<RelationEntry>,
}

fn default_industry() -> String {
    "기타".to_string()
}

/// Why an extraction attempt (or the whole attempt sequence) failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    RateLimited,
    MalformedOutput,
    RefusalDetected,
    TransportError,
    Exhausted,
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::RateLimited => "rate limited",
            FailureReason::MalformedOutput => "malformed output",
            FailureReason::RefusalDetected => "refusal detected",
            FailureReason::TransportError => "transport error",
            FailureReason::Exhausted => "retries exhausted",
        }
    }
}

/// Terminal outcome of one extraction call. On success the first ~100
/// characters of the raw model response are kept for the audit ledger.
#[derive(Debug, Clone)]
pub enum ExtractionResult {
    Success {
        payload: ExtractionPayload,
        raw_excerpt: String,
    },
    Failure {
        reason: FailureReason,
    },
}

/// Supplier rows are labeled 공급처, buyer rows 판매처 in the output
/// artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationKind {
    Supplier,
    Buyer,
}

impl RelationKind {
    pub fn label(&self) -> &'static str {
        match self {
            RelationKind::Supplier => "공급처",
            RelationKind::Buyer => "판매처",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "공급처" => Some(RelationKind::Supplier),
            "판매처" => Some(RelationKind::Buyer),
            _ => None,
        }
    }
}

/// Which extraction pass produced a record. Audit-only; never part of a
/// dedup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceTag {
    Llm,
    Filing,
}

impl SourceTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceTag::Llm => "llm",
            SourceTag::Filing => "filing",
        }
    }
}

/// The normalized storage and merge unit: one counterparty relationship
/// for one company. Never mutated after creation; reconciliation only
/// filters and selects.
#[derive(Debug, Clone)]
pub struct RelationRecord {
    pub company_name: String,
    pub industry: String,
    pub kind: RelationKind,
    pub subcategory: String,
    pub counterparty: String,
    pub source: SourceTag,
}
