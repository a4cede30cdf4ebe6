use anyhow::{Context, Result};
use extract::{RelationKind, RelationRecord, SourceTag};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Row layout of a per-company artifact, matching the original
/// spreadsheet columns: 종목명, 대분류, 중분류, 소분류, 연관기업.
#[derive(Debug, Serialize, Deserialize)]
pub struct ArtifactRow {
    #[serde(rename = "종목명")]
    pub company_name: String,
    #[serde(rename = "대분류")]
    pub industry: String,
    #[serde(rename = "중분류")]
    pub relation_kind: String,
    #[serde(rename = "소분류")]
    pub subcategory: String,
    #[serde(rename = "연관기업")]
    pub counterparty: String,
}

impl ArtifactRow {
    pub fn from_record(record: &RelationRecord) -> Self {
        Self {
            company_name: record.company_name.clone(),
            industry: record.industry.clone(),
            relation_kind: record.kind.label().to_string(),
            subcategory: record.subcategory.clone(),
            counterparty: record.counterparty.clone(),
        }
    }

    /// None when the relation-kind label is not 공급처/판매처.
    pub fn into_record(self, source: SourceTag) -> Option<RelationRecord> {
        let kind = RelationKind::from_label(&self.relation_kind)?;
        Some(RelationRecord {
            company_name: self.company_name,
            industry: self.industry,
            kind,
            subcategory: self.subcategory,
            counterparty: self.counterparty,
            source,
        })
    }
}

pub fn write_records(path: &Path, records: &[RelationRecord]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("Failed to create artifact: {:?}", path))?;
    for record in records {
        writer
            .serialize(ArtifactRow::from_record(record))
            .with_context(|| format!("Failed to write artifact row: {:?}", path))?;
    }
    writer.flush()?;
    Ok(())
}

/// Read one per-company artifact, tagging every row with its source
/// pass. Rows with an unrecognized relation-kind label are skipped with
/// a warning rather than failing the file.
pub fn read_records(path: &Path, source: SourceTag) -> Result<Vec<RelationRecord>> {
    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("Failed to open artifact: {:?}", path))?;

    let mut records = Vec::new();
    for row in reader.deserialize::<ArtifactRow>() {
        let row = row.with_context(|| format!("Failed to parse artifact row: {:?}", path))?;
        match row.into_record(source) {
            Some(record) => records.push(record),
            None => warn!(path = %path.display(), "skipping row with unknown relation kind"),
        }
    }

    Ok(records)
}
