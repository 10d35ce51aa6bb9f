//! Build automation tasks for Biblio
//!
//! - Generating the CLI reference from the clap definitions

use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation tasks for Biblio", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Generate the biblio-ingest CLI reference in Markdown
    GenerateCliDocs {
        /// Output directory for generated documentation
        #[arg(short, long, default_value = "docs")]
        output_dir: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::GenerateCliDocs { output_dir } => generate_cli_docs(&output_dir)?,
    }

    Ok(())
}

fn generate_cli_docs(output_dir: &str) -> anyhow::Result<()> {
    println!("Generating CLI documentation...");

    let markdown = clap_markdown::help_markdown::<biblio_ingest::Cli>();

    let content = format!(
        r#"# biblio-ingest CLI Reference

Generated from the CLI source code on {}.

## Overview

`biblio-ingest` reads every `.json` file directly inside a directory, accepts
Scopus Abstract Retrieval responses, Search API result pages, vendor dumps and
bare arrays of records, and writes one normalized CSV table with the columns
`eid, title, abstract, doi, publication_name, cover_date, citedby_count,
author_ids, subject_areas, affiliations`.

Files that cannot be read or parsed are skipped and listed in the log; they
never stop the run.

## Quick Start

```bash
# Ingest a directory of exports
biblio-ingest load --input ./exports/2019 --output data.csv

# Deterministic row order, 16 files in flight
biblio-ingest load -i ./exports/2019 -o data.csv -c 16 --sort-by-eid

# Inspect how one file is normalized
biblio-ingest normalize ./exports/2019/2-s2.0-85061234567.json
```

## Commands

{}

## Environment Variables

- `INGEST_CONCURRENCY` - Files processed at the same time (default: `100`)
- `LOG_LEVEL` - `trace`, `debug`, `info`, `warn`, `error`
- `LOG_OUTPUT` - `console`, `file`, `both`
- `LOG_FORMAT` - `text`, `json`
- `LOG_DIR` - Directory for log files (default: `./logs`)

---

*To update, run `cargo run --manifest-path xtask/Cargo.toml -- generate-cli-docs`.*
"#,
        chrono::Utc::now().format("%Y-%m-%d"),
        markdown
    );

    let output_path = PathBuf::from(output_dir);
    fs::create_dir_all(&output_path)?;

    let file_path = output_path.join("cli-reference.md");
    fs::write(&file_path, content)?;

    println!("Generated CLI documentation at: {}", file_path.display());

    Ok(())
}
