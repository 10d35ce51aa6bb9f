//! Error types for Biblio

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Biblio operations
pub type Result<T> = std::result::Result<T, BiblioError>;

/// Main error type for Biblio
///
/// Only run-level failures are represented here. A single unreadable or
/// malformed input file is reported as data, not as a `BiblioError`.
#[derive(Error, Debug)]
pub enum BiblioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Cannot read input directory {}: {source}", path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write output {}: {message}", path.display())]
    Output { path: PathBuf, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BiblioError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn output(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::Output {
            path: path.into(),
            message: err.to_string(),
        }
    }
}
