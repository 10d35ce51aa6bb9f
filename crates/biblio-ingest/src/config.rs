//! Ingestion configuration

use biblio_common::{BiblioError, Result};
use serde::{Deserialize, Serialize};

// ============================================================================
// Ingestion Configuration Constants
// ============================================================================

/// Default number of files read, parsed and normalized at the same time.
pub const DEFAULT_CONCURRENCY: usize = 100;

/// Environment variable overriding [`DEFAULT_CONCURRENCY`].
pub const CONCURRENCY_ENV: &str = "INGEST_CONCURRENCY";

/// Ingestion run configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Upper bound on files in flight. Caps open handles and the memory held
    /// by parsed documents.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
        }
    }
}

impl IngestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from the environment (and a `.env` file if present)
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();
        if let Ok(raw) = std::env::var(CONCURRENCY_ENV) {
            config.concurrency = raw.trim().parse().map_err(|_| {
                BiblioError::config(format!("{} must be a positive integer, got '{}'", CONCURRENCY_ENV, raw))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            return Err(BiblioError::config("concurrency must be greater than 0"));
        }
        Ok(())
    }
}
