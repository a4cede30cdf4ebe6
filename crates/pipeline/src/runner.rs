use anyhow::{Context, Result};
use extract::llm::ChatApi;
use extract::{ExtractionClient, ExtractionResult, SourceTag, normalize};
use ingest::bundle::RawDocument;
use ingest::{CorpCodeTable, bundle_paths, company_id_from_path, load_bundle};
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

/// One line of the failure ledger written alongside the per-company
/// artifacts.
#[derive(Debug, Serialize)]
pub struct FailureEntry {
    #[serde(rename = "종목코드")]
    pub company_id: String,
    #[serde(rename = "기업명")]
    pub company_name: String,
    #[serde(rename = "실패 이유")]
    pub reason: String,
    #[serde(rename = "GPT 응답 요약")]
    pub excerpt: String,
}

#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub succeeded: usize,
    pub failed: usize,
}

/// Run extraction over every bundle in `input_dir`, one company to
/// completion before the next. A company that never reaches a terminal
/// success is ledgered and the batch moves on; nothing here aborts the
/// run.
pub async fn run_extraction<C: ChatApi>(
    client: &ExtractionClient<C>,
    corp_codes: &CorpCodeTable,
    input_dir: &Path,
    output_dir: &Path,
) -> Result<BatchOutcome> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;

    let paths = bundle_paths(input_dir).await?;
    let total = paths.len();

    let mut failures: Vec<FailureEntry> = Vec::new();
    let mut succeeded = 0;

    for (idx, path) in paths.iter().enumerate() {
        let company_id = company_id_from_path(path);
        let company_name = corp_codes.resolve(&company_id).to_string();
        info!(
            index = idx + 1,
            total,
            company_id = company_id.as_str(),
            company = company_name.as_str(),
            "processing company"
        );

        let bundle = match load_bundle(path).await {
            Ok(bundle) => bundle,
            Err(e) => {
                warn!(company_id = company_id.as_str(), error = %e, "unreadable bundle");
                failures.push(FailureEntry {
                    company_id,
                    company_name,
                    reason: format!("malformed bundle: {e:#}"),
                    excerpt: String::new(),
                });
                continue;
            }
        };

        if bundle.is_empty() {
            failures.push(FailureEntry {
                company_id,
                company_name,
                reason: "empty bundle".to_string(),
                excerpt: String::new(),
            });
            continue;
        }

        let doc = RawDocument {
            company_id: company_id.clone(),
            company_name: company_name.clone(),
            text: bundle.full_text(),
        };

        let result = client.extract(&doc).await;
        match &result {
            ExtractionResult::Success { .. } => {
                let records = normalize(&company_name, &result, SourceTag::Llm);
                let artifact_path = output_dir.join(format!("{company_id}.csv"));
                merge::write_records(&artifact_path, &records)?;
                info!(
                    company_id = company_id.as_str(),
                    rows = records.len(),
                    "artifact written"
                );
                succeeded += 1;
            }
            ExtractionResult::Failure { reason } => {
                failures.push(FailureEntry {
                    company_id,
                    company_name,
                    reason: reason.as_str().to_string(),
                    excerpt: String::new(),
                });
            }
        }
    }

    let failed = failures.len();
    if !failures.is_empty() {
        write_failure_ledger(&output_dir.join("fail_list.csv"), &failures)?;
        warn!(failed, "some companies failed, see fail_list.csv");
    }
    info!(succeeded, failed, total, "extraction batch finished");

    Ok(BatchOutcome { succeeded, failed })
}

fn write_failure_ledger(path: &Path, failures: &[FailureEntry]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create failure ledger: {:?}", path))?;
    for entry in failures {
        writer.serialize(entry)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use extract::llm::LlmError;
    use std::time::Duration;

    struct FixedChat {
        reply: String,
    }

    impl ChatApi for FixedChat {
        async fn chat(&self, _system: &str, _user: &str) -> Result<String, LlmError> {
            Ok(self.reply.clone())
        }
    }

    fn write_bundle(dir: &Path, name: &str, text: &str) {
        let bundle = format!(
            r#"{{"report_nm": "사업보고서", "rcept_no": "20250311000123", "sections": [{{"title": "3. 원재료 및 생산설비", "text": "{text}", "tables": []}}]}}"#
        );
        std::fs::write(dir.join(name), bundle).unwrap();
    }

    fn client(reply: &str) -> ExtractionClient<FixedChat> {
        ExtractionClient::new(
            FixedChat {
                reply: reply.to_string(),
            },
            6000,
            3,
            Duration::ZERO,
            Duration::ZERO,
        )
    }

    #[tokio::test]
    async fn test_batch_writes_artifacts_per_company() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write_bundle(input.path(), "005490.json", "주요 원재료는 POSCO, 현대제철로부터 공급받는다");

        let reply = r#"{"industry": "철강", "suppliers": [{"category": "원재료", "company": "POSCO"}, {"category": "원재료", "company": "현대제철"}], "buyers": []}"#;
        let outcome = run_extraction(
            &client(reply),
            &CorpCodeTable::empty(),
            input.path(),
            output.path(),
        )
        .await
        .unwrap();

        assert_eq!(outcome.succeeded, 1);
        assert_eq!(outcome.failed, 0);

        let records =
            merge::read_records(&output.path().join("005490.csv"), SourceTag::Llm).unwrap();
        assert_eq!(records.len(), 2);
        assert!(!output.path().join("fail_list.csv").exists());
    }

    #[tokio::test]
    async fn test_exhausted_company_lands_in_ledger_and_batch_continues() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write_bundle(input.path(), "000001.json", "본문");
        write_bundle(input.path(), "000002.json", "본문");

        let outcome = run_extraction(
            &client("I could not produce any structured output."),
            &CorpCodeTable::empty(),
            input.path(),
            output.path(),
        )
        .await
        .unwrap();

        assert_eq!(outcome.succeeded, 0);
        assert_eq!(outcome.failed, 2);

        let ledger = std::fs::read_to_string(output.path().join("fail_list.csv")).unwrap();
        assert!(ledger.contains("000001"));
        assert!(ledger.contains("000002"));
        assert!(ledger.contains("retries exhausted"));
    }

    #[tokio::test]
    async fn test_malformed_bundle_is_ledgered() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        std::fs::write(input.path().join("000003.json"), "not json at all").unwrap();

        let reply = r#"{"industry": "철강", "suppliers": [], "buyers": []}"#;
        let outcome = run_extraction(
            &client(reply),
            &CorpCodeTable::empty(),
            input.path(),
            output.path(),
        )
        .await
        .unwrap();

        assert_eq!(outcome.succeeded, 0);
        assert_eq!(outcome.failed, 1);
        let ledger = std::fs::read_to_string(output.path().join("fail_list.csv")).unwrap();
        assert!(ledger.contains("malformed bundle"));
    }
}
