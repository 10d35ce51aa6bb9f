//! CSV persistence of normalized records
//!
//! One header row, one row per record, no index column. Scalar columns that
//! are missing are written as empty cells; the three list columns are written
//! as compact JSON arrays so they survive a round trip through any CSV reader.

use biblio_common::{BiblioError, Result};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::normalizer::NormalizedRecord;

/// Output columns, in order
pub const COLUMNS: [&str; 10] = [
    "eid",
    "title",
    "abstract",
    "doi",
    "publication_name",
    "cover_date",
    "citedby_count",
    "author_ids",
    "subject_areas",
    "affiliations",
];

#[derive(Serialize)]
struct CsvRow<'a> {
    eid: Option<&'a str>,
    title: Option<&'a str>,
    abstract_text: Option<&'a str>,
    doi: Option<&'a str>,
    publication_name: Option<&'a str>,
    cover_date: Option<&'a str>,
    citedby_count: i64,
    author_ids: String,
    subject_areas: String,
    affiliations: String,
}

impl<'a> CsvRow<'a> {
    fn from_record(record: &'a NormalizedRecord) -> Result<Self> {
        Ok(Self {
            eid: record.eid.as_deref(),
            title: record.title.as_deref(),
            abstract_text: record.abstract_text.as_deref(),
            doi: record.doi.as_deref(),
            publication_name: record.publication_name.as_deref(),
            cover_date: record.cover_date.as_deref(),
            citedby_count: record.citedby_count,
            author_ids: serde_json::to_string(&record.author_ids)?,
            subject_areas: serde_json::to_string(&record.subject_areas)?,
            affiliations: serde_json::to_string(&record.affiliations)?,
        })
    }
}

/// Write `records` as CSV to any writer.
pub fn write_csv_to<W: Write>(records: &[NormalizedRecord], writer: W) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv.write_record(COLUMNS)?;
    for record in records {
        csv.serialize(CsvRow::from_record(record)?)?;
    }
    csv.flush()?;
    Ok(())
}

/// Write `records` to a CSV file, creating parent directories as needed.
pub fn write_csv(records: &[NormalizedRecord], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| BiblioError::output(path, e))?;
    }

    let file = File::create(path).map_err(|e| BiblioError::output(path, e))?;
    write_csv_to(records, file).map_err(|e| BiblioError::output(path, e))?;

    info!(path = %path.display(), rows = records.len(), "Wrote CSV output");
    Ok(())
}
