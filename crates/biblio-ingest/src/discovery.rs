//! Input file discovery

use biblio_common::{BiblioError, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File extension of export documents, matched case-insensitively
pub const JSON_EXTENSION: &str = ".json";

/// Whether a file name is eligible for ingestion.
///
/// Compares raw bytes, so names that are not valid UTF-8 still qualify.
pub fn is_json_file_name(name: &OsStr) -> bool {
    let name = name.as_encoded_bytes();
    name.len() >= JSON_EXTENSION.len()
        && name[name.len() - JSON_EXTENSION.len()..].eq_ignore_ascii_case(JSON_EXTENSION.as_bytes())
}

/// List the JSON files directly inside `dir`.
///
/// Subdirectories and other files are ignored. Failing to read the directory
/// itself is fatal for the run. Paths are returned sorted by name.
pub fn discover_json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let discovery_error = |source| BiblioError::Discovery {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(discovery_error)? {
        let path = entry.map_err(discovery_error)?.path();

        let eligible = path.file_name().is_some_and(is_json_file_name);
        if !eligible {
            continue;
        }

        // follows symlinks
        if !path.is_file() {
            debug!(path = %path.display(), "Skipping non-file entry");
            continue;
        }

        files.push(path);
    }

    files.sort();
    debug!(dir = %dir.display(), count = files.len(), "Discovered export files");
    Ok(files)
}
