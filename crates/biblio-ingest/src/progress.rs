//! Progress reporting for ingestion runs
//!
//! Purely observational: the engine ticks once per finished file and never
//! waits on the bar.

use indicatif::{ProgressBar, ProgressStyle};

const FILES_TEMPLATE: &str =
    "{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} files ({eta})";

/// Files-completed counter for one run
#[derive(Debug, Clone)]
pub struct IngestProgress {
    bar: ProgressBar,
}

impl IngestProgress {
    /// Visible bar on stderr sized to `total` files.
    pub fn new(total: u64) -> Self {
        let bar = ProgressBar::new(total);
        // template is a constant; fall back to the default style if it ever fails to parse
        if let Ok(style) = ProgressStyle::default_bar().template(FILES_TEMPLATE) {
            bar.set_style(style.progress_chars("#>-"));
        }
        bar.set_message("Loading JSON exports");
        Self { bar }
    }

    /// Bar that draws nothing; used by tests and `--quiet`.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    pub fn set_total(&self, total: u64) {
        self.bar.set_length(total);
    }

    pub fn file_done(&self) {
        self.bar.inc(1);
    }

    pub fn completed(&self) -> u64 {
        self.bar.position()
    }

    pub fn finish(&self, summary: impl Into<String>) {
        self.bar.finish_with_message(summary.into());
    }
}
