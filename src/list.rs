//! URL list loading.
//!
//! The list is a plain text file with one entry per line. Lines may carry
//! trailing comma-separated columns (export formats from the data portal
//! do this); only the first column is the URL. Blank lines are ignored.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

/// Errors from reading the URL list file.
#[derive(Debug, Error)]
pub enum ListError {
    /// The list file could not be read at all.
    #[error("failed to read URL list {path}: {source}")]
    Read {
        /// The list file path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The list file was readable but held no usable entries.
    #[error("no URLs found in {path}")]
    Empty {
        /// The list file path.
        path: PathBuf,
    },
}

impl ListError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn empty(path: impl Into<PathBuf>) -> Self {
        Self::Empty { path: path.into() }
    }
}

/// Reads the URL list, keeping the first comma-separated column of each
/// non-blank line.
///
/// The returned entries are raw strings in file order; URL validation
/// happens later when the queue is built.
///
/// # Errors
///
/// Returns [`ListError::Read`] if the file cannot be read and
/// [`ListError::Empty`] if no line yields a non-blank entry.
pub fn load_urls(path: &Path) -> Result<Vec<String>, ListError> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| ListError::read(path.to_path_buf(), e))?;

    let urls: Vec<String> = contents
        .lines()
        .map(|line| line.split(',').next().unwrap_or(line).trim())
        .filter(|entry| !entry.is_empty())
        .map(ToString::to_string)
        .collect();

    if urls.is_empty() {
        return Err(ListError::empty(path.to_path_buf()));
    }

    info!(count = urls.len(), path = %path.display(), "loaded URL list");
    Ok(urls)
}
