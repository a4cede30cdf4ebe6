use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// All tunables of the pipeline in one place, passed into components at
/// construction. No ambient global state; the API key may come from the
/// environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub model: String,
    pub api_base: String,
    pub api_key: String,
    pub max_retries: usize,
    pub retry_delay_secs: u64,
    pub rate_limit_delay_secs: u64,
    pub request_timeout_secs: Option<u64>,
    pub similarity_threshold: f64,
    pub token_budget: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4".to_string(),
            api_base: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            max_retries: 3,
            retry_delay_secs: 3,
            rate_limit_delay_secs: 30,
            request_timeout_secs: None,
            similarity_threshold: merge::DEFAULT_THRESHOLD,
            token_budget: 6000,
        }
    }
}

impl PipelineConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config: {:?}", path))
    }

    /// `OPENAI_API_KEY` takes precedence over the file value, so keys
    /// stay out of checked-in config files.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            self.api_key = key;
        }
        self
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }

    pub fn rate_limit_delay(&self) -> Duration {
        Duration::from_secs(self.rate_limit_delay_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_batch_design() {
        let config = PipelineConfig::default();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_delay(), Duration::from_secs(3));
        assert_eq!(config.rate_limit_delay(), Duration::from_secs(30));
        assert_eq!(config.token_budget, 6000);
        assert_eq!(config.similarity_threshold, 0.85);
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn test_partial_toml_overrides_defaults() {
        let config: PipelineConfig =
            toml::from_str("model = \"gpt-4o\"\nmax_retries = 5\n").unwrap();
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.token_budget, 6000);
    }
}
