//! Biblio Ingest - bibliographic export ingestion tool

use anyhow::{Context, Result};
use biblio_common::logging::{init_logging, LogConfig, LogLevel};
use biblio_ingest::cli::{Cli, Command};
use biblio_ingest::engine::load_records;
use biblio_ingest::output::write_csv;
use biblio_ingest::progress::IngestProgress;
use biblio_ingest::{IngestConfig, Ingestor};
use clap::Parser;
use std::path::Path;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    // Environment variables take precedence over flags
    let log_config = LogConfig::builder()
        .level(log_level)
        .log_file_prefix("biblio-ingest")
        .build()
        .merge_env()?;

    let _log_guard = init_logging(&log_config)?;

    match cli.command {
        Command::Load {
            input,
            output,
            concurrency,
            sort_by_eid,
            quiet,
        } => {
            let mut config = IngestConfig::from_env()?;
            if let Some(concurrency) = concurrency {
                config = config.with_concurrency(concurrency);
            }
            config.validate()?;

            load(&input, &output, config, sort_by_eid, quiet).await?;
        },
        Command::Normalize { file } => {
            let records = load_records(&file)
                .await
                .with_context(|| format!("Failed to load {}", file.display()))?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        },
    }

    Ok(())
}

async fn load(
    input: &Path,
    output: &Path,
    config: IngestConfig,
    sort_by_eid: bool,
    quiet: bool,
) -> Result<()> {
    let progress = if quiet {
        IngestProgress::hidden()
    } else {
        IngestProgress::new(0)
    };

    let mut report = Ingestor::new(config)
        .run(input, &progress)
        .await
        .with_context(|| format!("Failed to ingest {}", input.display()))?;

    progress.finish(format!(
        "Loaded {} records from {} / {} files",
        report.record_count(),
        report.files_loaded,
        report.files_discovered
    ));

    if sort_by_eid {
        report.sort_by_eid();
    }

    write_csv(&report.records, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(
        run_id = %report.run_id,
        rows = report.record_count(),
        skipped = report.failures.len(),
        output = %output.display(),
        "Done"
    );
    Ok(())
}
