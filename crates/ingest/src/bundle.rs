use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// One section of a disclosure report, e.g. "3. 원재료 및 생산설비".
/// `tables` is an auxiliary structured rendering of in-document tables;
/// it is passed through untouched and not consumed by extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub tables: Vec<serde_json::Value>,
}

/// A company's disclosure bundle as produced by the filing retriever,
/// one JSON file per company named `<stock_code>.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentBundle {
    #[serde(default)]
    pub report_nm: String,
    #[serde(default)]
    pub rcept_no: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl DocumentBundle {
    /// Section texts joined line-wise, in report order.
    pub fn full_text(&self) -> String {
        self.sections
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|s| s.text.trim().is_empty())
    }
}

/// The unit submitted for extraction: one company's full report text.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub company_id: String,
    pub company_name: String,
    pub text: String,
}

pub async fn load_bundle(path: &Path) -> Result<DocumentBundle> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read bundle: {:?}", path))?;
    let bundle: DocumentBundle = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse bundle: {:?}", path))?;
    Ok(bundle)
}

/// All `*.json` bundle paths in a directory, sorted by filename so batch
/// runs visit companies in a stable order.
pub async fn bundle_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    let mut entries = fs::read_dir(dir)
        .await
        .with_context(|| format!("Failed to read bundle directory: {:?}", dir))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|e| e == "json") {
            paths.push(path);
        }
    }

    paths.sort();
    Ok(paths)
}

/// Company id from a bundle path: the filename stem (`005930.json` → `005930`).
pub fn company_id_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_text_joins_sections() {
        let bundle = DocumentBundle {
            report_nm: "사업보고서 (2024.12)".to_string(),
            rcept_no: "20250311000123".to_string(),
            sections: vec![
                Section {
                    title: "3. 원재료 및 생산설비".to_string(),
                    text: "주요 원재료는 철광석이다.".to_string(),
                    tables: vec![],
                },
                Section {
                    title: "4. 매출 및 수주상황".to_string(),
                    text: "주요 판매처는 현대자동차이다.".to_string(),
                    tables: vec![],
                },
            ],
        };

        let text = bundle.full_text();
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with("주요 원재료는"));
    }

    #[test]
    fn test_bundle_parses_with_missing_fields() {
        let json = r#"{"sections": [{"title": "사업의 내용", "text": "본문", "tables": []}]}"#;
        let bundle: DocumentBundle = serde_json::from_str(json).unwrap();
        assert_eq!(bundle.report_nm, "");
        assert_eq!(bundle.sections.len(), 1);
        assert!(!bundle.is_empty());
    }

    #[test]
    fn test_company_id_from_path() {
        assert_eq!(company_id_from_path(Path::new("/data/005930.json")), "005930");
    }
}
