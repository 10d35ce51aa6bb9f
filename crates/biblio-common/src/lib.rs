//! Biblio Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared error handling and logging for the Biblio workspace.
//!
//! # Overview
//!
//! - **Error Handling**: [`BiblioError`] and the [`Result`] alias
//! - **Logging**: tracing subscriber setup driven by [`logging::LogConfig`]
//!
//! # Example
//!
//! ```no_run
//! use biblio_common::Result;
//!
//! fn read_export(path: &str) -> Result<serde_json::Value> {
//!     let text = std::fs::read_to_string(path)?;
//!     Ok(serde_json::from_str(&text)?)
//! }
//! ```

pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{BiblioError, Result};
