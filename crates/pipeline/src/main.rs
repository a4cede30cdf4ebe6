mod config;
mod runner;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::PipelineConfig;
use extract::{ExtractionClient, OpenAiClient};
use ingest::CorpCodeTable;
use std::path::PathBuf;
use tracing::info;

/// Supply-chain relation extraction and reconciliation over corporate
/// disclosure bundles.
#[derive(Parser)]
#[command(name = "pipeline")]
struct Cli {
    /// Optional TOML config; defaults are used when absent.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run LLM extraction over a directory of disclosure bundles,
    /// writing one artifact per company plus a failure ledger.
    Extract {
        /// Directory of per-company `*.json` bundles.
        #[arg(long)]
        input: PathBuf,
        /// Directory for per-company artifacts and `fail_list.csv`.
        #[arg(long)]
        output: PathBuf,
        /// CORPCODE.xml for stock-code → company-name resolution.
        #[arg(long)]
        corp_codes: Option<PathBuf>,
    },
    /// Merge two per-company artifact directories into reconciled
    /// artifacts, first directory's rows winning duplicate ties.
    Merge {
        #[arg(long)]
        dir_a: PathBuf,
        #[arg(long)]
        dir_b: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
    /// Flatten a directory of per-company artifacts into one dataset
    /// with a trailing company-id column.
    Combine {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    }
    .with_env_overrides();

    match cli.command {
        Command::Extract {
            input,
            output,
            corp_codes,
        } => {
            let chat = OpenAiClient::new(
                config.api_base.clone(),
                config.api_key.clone(),
                config.model.clone(),
                config.request_timeout(),
            )?;
            let client = ExtractionClient::new(
                chat,
                config.token_budget,
                config.max_retries,
                config.retry_delay(),
                config.rate_limit_delay(),
            );

            let table = match corp_codes {
                Some(path) => CorpCodeTable::load(&path).await?,
                None => CorpCodeTable::empty(),
            };
            if !table.is_empty() {
                info!(companies = table.len(), "corp code table loaded");
            }

            runner::run_extraction(&client, &table, &input, &output).await?;
        }
        Command::Merge {
            dir_a,
            dir_b,
            output,
        } => {
            let summary =
                merge::merge_directories(&dir_a, &dir_b, &output, config.similarity_threshold)?;
            info!(
                merged = summary.merged,
                skipped = summary.skipped,
                "merge finished"
            );
        }
        Command::Combine { input, output } => {
            let rows = merge::combine_directory(&input, &output)?;
            info!(rows, output = %output.display(), "combine finished");
        }
    }

    Ok(())
}
