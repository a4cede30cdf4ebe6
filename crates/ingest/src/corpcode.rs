use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

/// One `<list>` element of the registry's CORPCODE.xml dump. Unlisted
/// companies carry a blank stock code.
#[derive(Debug, Deserialize)]
struct CorpCodeEntry {
    corp_name: String,
    #[serde(default)]
    stock_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CorpCodeFile {
    #[serde(rename = "list", default)]
    entries: Vec<CorpCodeEntry>,
}

/// Stock-code → corporate-name lookup, parsed from the filing registry's
/// CORPCODE.xml. Fetching the zip is the retriever's job; this only reads
/// the extracted XML.
pub struct CorpCodeTable {
    by_stock_code: HashMap<String, String>,
}

impl CorpCodeTable {
    pub fn parse(xml: &str) -> Result<Self> {
        let file: CorpCodeFile =
            quick_xml::de::from_str(xml).context("Failed to parse CORPCODE.xml")?;

        let mut by_stock_code = HashMap::new();
        for entry in file.entries {
            if let Some(code) = entry.stock_code {
                let code = code.trim();
                if !code.is_empty() {
                    by_stock_code.insert(code.to_string(), entry.corp_name);
                }
            }
        }

        Ok(Self { by_stock_code })
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let xml = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read corp code table: {:?}", path))?;
        Self::parse(&xml)
    }

    /// Empty table, for runs without a registry dump: every company is
    /// then named by its code.
    pub fn empty() -> Self {
        Self {
            by_stock_code: HashMap::new(),
        }
    }

    /// Company name for a stock code, falling back to the code itself.
    pub fn resolve<'a>(&'a self, stock_code: &'a str) -> &'a str {
        self.by_stock_code
            .get(stock_code)
            .map(|s| s.as_str())
            .unwrap_or(stock_code)
    }

    pub fn len(&self) -> usize {
        self.by_stock_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_stock_code.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<result>
    <list>
        <corp_code>00126380</corp_code>
        <corp_name>삼성전자</corp_name>
        <stock_code>005930</stock_code>
        <modify_date>20240101</modify_date>
    </list>
    <list>
        <corp_code>00164742</corp_code>
        <corp_name>현대자동차</corp_name>
        <stock_code>005380</stock_code>
        <modify_date>20240101</modify_date>
    </list>
    <list>
        <corp_code>00999999</corp_code>
        <corp_name>비상장회사</corp_name>
        <stock_code> </stock_code>
        <modify_date>20240101</modify_date>
    </list>
</result>"#;

    #[test]
    fn test_parse_keeps_only_listed_companies() {
        let table = CorpCodeTable::parse(SAMPLE).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.resolve("005930"), "삼성전자");
        assert_eq!(table.resolve("005380"), "현대자동차");
    }

    #[test]
    fn test_resolve_falls_back_to_code() {
        let table = CorpCodeTable::empty();
        assert_eq!(table.resolve("123456"), "123456");
    }
}
