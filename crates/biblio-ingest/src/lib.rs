//! Biblio Ingest Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Turns a directory of heterogeneous bibliographic JSON exports (Scopus
//! Abstract Retrieval responses, Search API pages, vendor dumps, bare arrays)
//! into one flat table of [`NormalizedRecord`]s.
//!
//! # Pipeline
//!
//! 1. [`discovery`]: list the `.json` files of a directory
//! 2. [`engine`]: read and parse files with bounded concurrency, isolating
//!    per-file failures
//! 3. [`envelope`]: find the record entries inside each document
//! 4. [`normalizer`]: map every entry onto the flat record shape
//! 5. [`output`]: write the table as CSV
//!
//! # Example
//!
//! ```no_run
//! use biblio_ingest::{ingest_directory, output::write_csv, IngestConfig};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut report = ingest_directory(Path::new("./exports"), IngestConfig::default()).await?;
//!     report.sort_by_eid();
//!     write_csv(&report.records, Path::new("data.csv"))?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod discovery;
pub mod document;
pub mod engine;
pub mod envelope;
pub mod normalizer;
pub mod output;
pub mod progress;

pub use cli::Cli;
pub use config::IngestConfig;
pub use engine::{ingest_directory, FileFailure, IngestionReport, Ingestor};
pub use normalizer::{normalize_entry, Affiliation, NormalizedRecord};
