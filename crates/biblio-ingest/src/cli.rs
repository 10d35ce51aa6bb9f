//! Command-line interface definition
//!
//! Lives in the library so `xtask` can render the reference docs from it.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "biblio-ingest")]
#[command(
    author,
    version,
    about = "Normalize a directory of bibliographic JSON exports into one CSV table"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ingest every .json file in a directory and write the records as CSV
    Load {
        /// Directory holding the export files (not searched recursively)
        #[arg(short, long)]
        input: PathBuf,

        /// Destination CSV file
        #[arg(short, long, default_value = "data.csv")]
        output: PathBuf,

        /// Files processed at the same time [default: INGEST_CONCURRENCY or 100]
        #[arg(short, long)]
        concurrency: Option<usize>,

        /// Sort rows by eid instead of completion order
        #[arg(long)]
        sort_by_eid: bool,

        /// Hide the progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Normalize a single export file and print its records as JSON
    Normalize {
        /// Export file to inspect
        file: PathBuf,
    },
}
