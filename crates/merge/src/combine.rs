use crate::artifact;
use crate::reconcile::reconcile;
use anyhow::{Context, Result};
use extract::{RelationRecord, SourceTag};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{info, warn};
use walkdir::WalkDir;

#[derive(Debug, Default)]
pub struct MergeSummary {
    pub merged: usize,
    pub skipped: usize,
}

/// Artifact filenames (`*.csv`) directly inside a directory, sorted.
fn artifact_names(dir: &Path) -> BTreeSet<String> {
    WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().to_string();
            name.ends_with(".csv").then_some(name)
        })
        .collect()
}

/// Best-effort read of one source's artifact: a missing file contributes
/// nothing, an unreadable one is logged and skipped. Batch merges must
/// tolerate partial inputs.
fn read_source(dir: &Path, name: &str, source: SourceTag) -> Vec<RelationRecord> {
    let path = dir.join(name);
    if !path.exists() {
        return Vec::new();
    }
    match artifact::read_records(&path, source) {
        Ok(records) => {
            if records.is_empty() {
                warn!(file = name, source = source.as_str(), "artifact is empty");
            }
            records
        }
        Err(e) => {
            warn!(file = name, source = source.as_str(), error = %e, "failed to read artifact");
            Vec::new()
        }
    }
}

/// Merge two per-company artifact directories keyed by filename: pool
/// the first source's rows before the second's, reconcile, and write one
/// artifact per company into `out_dir`. Companies with no readable rows
/// in either source are skipped.
pub fn merge_directories(
    dir_a: &Path,
    dir_b: &Path,
    out_dir: &Path,
    threshold: f64,
) -> Result<MergeSummary> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", out_dir))?;

    let mut names = artifact_names(dir_a);
    names.extend(artifact_names(dir_b));

    let mut summary = MergeSummary::default();

    for name in &names {
        let mut pooled = read_source(dir_a, name, SourceTag::Filing);
        pooled.extend(read_source(dir_b, name, SourceTag::Llm));

        if pooled.is_empty() {
            info!(file = name, "nothing to merge, skipping");
            summary.skipped += 1;
            continue;
        }

        let reconciled = reconcile(pooled, threshold);
        artifact::write_records(&out_dir.join(name), &reconciled)?;
        info!(file = name, rows = reconciled.len(), "merged");
        summary.merged += 1;
    }

    Ok(summary)
}

/// One row of the combined dataset: the per-company columns plus the
/// company id recovered from the artifact filename.
#[derive(Debug, Serialize)]
struct CombinedRow {
    #[serde(rename = "종목명")]
    company_name: String,
    #[serde(rename = "대분류")]
    industry: String,
    #[serde(rename = "중분류")]
    relation_kind: String,
    #[serde(rename = "소분류")]
    subcategory: String,
    #[serde(rename = "연관기업")]
    counterparty: String,
    #[serde(rename = "종목코드")]
    company_id: String,
}

/// Append every per-company artifact in a directory into a single file,
/// with the company id (filename stem) as a trailing column.
pub fn combine_directory(dir: &Path, out_file: &Path) -> Result<usize> {
    // Collect names before opening the output so a combined file placed
    // in the same directory is never picked up as an input.
    let names = artifact_names(dir);

    let mut writer = csv::Writer::from_path(out_file)
        .with_context(|| format!("Failed to create combined file: {:?}", out_file))?;

    let mut rows = 0;
    for name in names {
        let path = dir.join(&name);
        // A combined file left in the directory by an earlier run is
        // not an input; without this it would be truncated by the
        // writer above and re-read under a phantom company id.
        if path == out_file {
            continue;
        }
        let company_id = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let records = match artifact::read_records(&path, SourceTag::Llm) {
            Ok(records) => records,
            Err(e) => {
                warn!(file = name.as_str(), error = %e, "failed to read artifact, skipping");
                continue;
            }
        };

        for record in records {
            writer.serialize(CombinedRow {
                company_name: record.company_name,
                industry: record.industry,
                relation_kind: record.kind.label().to_string(),
                subcategory: record.subcategory,
                counterparty: record.counterparty,
                company_id: company_id.clone(),
            })?;
            rows += 1;
        }
    }

    writer.flush()?;
    Ok(rows)
}
