//! Configuration document discovery.
//!
//! Walks the content tree recursively and returns every file whose extension
//! is one of `scan.extensions`, compared case-insensitively:
//!
//! ```text
//! contents/                        # Content root (--source)
//! ├── food.yml                     # Document
//! ├── tools/
//! │   ├── hammers.yaml             # Nested documents are found too
//! │   └── notes.txt                # Ignored: not a configured extension
//! └── .backup/                     # Hidden entries are skipped entirely
//!     └── food.yml
//! ```
//!
//! Paths come back in sorted order (file names compared per directory,
//! depth-first), so pages and reports are deterministic across runs and
//! platforms. Unreadable entries are logged and skipped; only a missing or
//! non-directory root is an error.

use log::{debug, warn};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("source directory does not exist: {0}")]
    NotFound(PathBuf),
    #[error("source is not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Find every configuration document under `root`.
pub fn scan(root: &Path, extensions: &[String]) -> Result<Vec<PathBuf>, ScanError> {
    if !root.exists() {
        return Err(ScanError::NotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let mut documents = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping unreadable entry: {e}");
                continue;
            }
        };
        if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
            debug!("found document {}", entry.path().display());
            documents.push(entry.into_path());
        }
    }
    Ok(documents)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension() else {
        return false;
    };
    let ext = ext.to_string_lossy();
    extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext))
}
