//! Directory ingestion engine
//!
//! Discovers the export files of one directory and pushes each of them
//! through read, parse, record extraction and normalization. Files are
//! independent units of work:
//!
//! - at most `concurrency` files are in flight at once (`buffer_unordered`)
//! - a file that cannot be read or parsed becomes a [`FileFailure`] in the
//!   report and contributes no records; the run carries on
//! - records are collected in completion order, which is not stable across
//!   runs (see [`IngestionReport::sort_by_eid`])
//!
//! Only a directory that cannot be listed aborts the run.

use biblio_common::Result;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::config::IngestConfig;
use crate::discovery::discover_json_files;
use crate::envelope::extract_records;
use crate::normalizer::{normalize_entry, NormalizedRecord};
use crate::progress::IngestProgress;

/// Why a single file contributed nothing
#[derive(Error, Debug)]
pub enum FileError {
    #[error("read failed: {0}")]
    Read(#[source] std::io::Error),

    #[error("invalid JSON: {0}")]
    Parse(#[source] serde_json::Error),
}

impl FileError {
    pub fn kind(&self) -> FailureKind {
        match self {
            FileError::Read(_) => FailureKind::Read,
            FileError::Parse(_) => FailureKind::Parse,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    Read,
    Parse,
}

/// A skipped file and the reason, as kept in the run report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub kind: FailureKind,
    pub message: String,
}

impl FileFailure {
    fn new(path: PathBuf, err: &FileError) -> Self {
        Self {
            path,
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Result of processing one file
#[derive(Debug)]
pub enum FileOutcome {
    Loaded {
        path: PathBuf,
        records: Vec<NormalizedRecord>,
    },
    Failed(FileFailure),
}

/// Everything produced by one ingestion run
#[derive(Debug, Clone, Serialize)]
pub struct IngestionReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub directory: PathBuf,
    pub files_discovered: usize,
    pub files_loaded: usize,
    pub records: Vec<NormalizedRecord>,
    pub failures: Vec<FileFailure>,
    pub duration_seconds: f64,
}

impl IngestionReport {
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn failed_files(&self) -> impl Iterator<Item = &Path> {
        self.failures.iter().map(|f| f.path.as_path())
    }

    /// Order records by `eid`; records without one go last. Ties keep
    /// completion order.
    pub fn sort_by_eid(&mut self) {
        self.records
            .sort_by(|a, b| (a.eid.is_none(), &a.eid).cmp(&(b.eid.is_none(), &b.eid)));
    }
}

/// Turn a parsed document into normalized records.
pub fn normalize_document(document: Value) -> Vec<NormalizedRecord> {
    extract_records(document)
        .iter()
        .map(normalize_entry)
        .collect()
}

/// Read, parse and normalize one file.
///
/// The file handle lives only inside `read_to_string`, so it is closed on
/// every path out of this function.
pub async fn load_records(path: &Path) -> std::result::Result<Vec<NormalizedRecord>, FileError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(FileError::Read)?;
    let document: Value = serde_json::from_str(&content).map_err(FileError::Parse)?;
    Ok(normalize_document(document))
}

/// [`load_records`] with the error turned into a logged [`FileFailure`].
pub async fn load_file(path: PathBuf) -> FileOutcome {
    match load_records(&path).await {
        Ok(records) => {
            debug!(path = %path.display(), records = records.len(), "Loaded export file");
            FileOutcome::Loaded { path, records }
        },
        Err(err) => {
            error!(path = %path.display(), error = %err, "Failed to load export file");
            FileOutcome::Failed(FileFailure::new(path, &err))
        },
    }
}

/// Outcomes of one batch of files, folded together
#[derive(Debug, Default)]
struct FileTally {
    files_loaded: usize,
    records: Vec<NormalizedRecord>,
    failures: Vec<FileFailure>,
}

/// Drive `load` over `files` with at most `concurrency` calls in flight.
async fn process_files<F, Fut>(
    files: Vec<PathBuf>,
    concurrency: usize,
    progress: &IngestProgress,
    load: F,
) -> FileTally
where
    F: FnMut(PathBuf) -> Fut,
    Fut: Future<Output = FileOutcome>,
{
    let mut outcomes = stream::iter(files).map(load).buffer_unordered(concurrency);
    let mut tally = FileTally::default();

    while let Some(outcome) = outcomes.next().await {
        progress.file_done();
        match outcome {
            FileOutcome::Loaded { records, .. } => {
                tally.files_loaded += 1;
                tally.records.extend(records);
            },
            FileOutcome::Failed(failure) => tally.failures.push(failure),
        }
    }

    tally
}

/// Runs ingestion over a directory with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct Ingestor {
    config: IngestConfig,
}

impl Ingestor {
    pub fn new(config: IngestConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Ingest every `.json` file directly inside `dir`.
    #[instrument(skip(self, dir, progress), fields(dir = %dir.display()))]
    pub async fn run(&self, dir: &Path, progress: &IngestProgress) -> Result<IngestionReport> {
        self.config.validate()?;

        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let start_time = Instant::now();

        let files = discover_json_files(dir)?;
        let files_discovered = files.len();
        progress.set_total(files_discovered as u64);

        info!(
            %run_id,
            files = files_discovered,
            concurrency = self.config.concurrency,
            "Starting ingestion"
        );

        let FileTally {
            files_loaded,
            records,
            failures,
        } = process_files(files, self.config.concurrency, progress, load_file).await;

        let duration = start_time.elapsed();

        info!(
            %run_id,
            files = files_discovered,
            loaded = files_loaded,
            failed = failures.len(),
            records = records.len(),
            "Ingestion complete in {:.2}s",
            duration.as_secs_f64()
        );

        Ok(IngestionReport {
            run_id,
            started_at,
            directory: dir.to_path_buf(),
            files_discovered,
            files_loaded,
            records,
            failures,
            duration_seconds: duration.as_secs_f64(),
        })
    }
}

/// Ingest a directory without drawing progress.
pub async fn ingest_directory(dir: &Path, config: IngestConfig) -> Result<IngestionReport> {
    Ingestor::new(config)
        .run(dir, &IngestProgress::hidden())
        .await
}
