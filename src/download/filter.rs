//! Queue construction: URL strings in, ordered work items out.
//!
//! Items whose destination already exists are dropped here, once, before
//! any download starts. The directory is not re-checked mid-run, so a file
//! appearing after queue construction is downloaded (and overwritten) as if
//! it were absent.

use std::path::{Path, PathBuf};

use tracing::{error, info};
use url::Url;

use super::filename::filename_from_url;

/// One file to fetch: the parsed source URL and where it lands on disk.
#[derive(Debug, Clone)]
pub struct WorkItem {
    /// Source URL, parsed eagerly so the fetcher never sees a malformed one.
    pub url: Url,
    /// Local filename, the URL's terminal path segment taken verbatim.
    pub file_name: String,
    /// Full destination path (`save_dir` joined with `file_name`).
    pub dest: PathBuf,
}

/// Result of filtering a URL list against the save directory.
#[derive(Debug, Default)]
pub struct FilterOutcome {
    /// Items still to download, in input order, duplicates preserved.
    pub queue: Vec<WorkItem>,
    /// URLs whose destination file already existed.
    pub skipped: usize,
    /// URLs that could not be parsed or yielded no usable filename.
    pub invalid: usize,
}

/// Builds the download queue from raw URL strings.
///
/// Input order is preserved and duplicates are kept: a URL is dropped only
/// when it is unusable (unparseable, or no terminal path segment) or when
/// its destination already exists. Unusable URLs are counted rather than
/// fetched; no number of retries could ever turn one into a request.
#[must_use]
pub fn build_queue(urls: &[String], save_dir: &Path) -> FilterOutcome {
    let mut outcome = FilterOutcome::default();

    for raw in urls {
        let Ok(url) = Url::parse(raw) else {
            error!(url = %raw, "skipping unparseable URL");
            outcome.invalid += 1;
            continue;
        };

        let Some(file_name) = filename_from_url(&url) else {
            error!(url = %raw, "skipping URL with no usable filename");
            outcome.invalid += 1;
            continue;
        };

        let dest = save_dir.join(&file_name);
        if dest.exists() {
            info!(file = %file_name, "skipping existing file");
            outcome.skipped += 1;
            continue;
        }

        outcome.queue.push(WorkItem {
            url,
            file_name,
            dest,
        });
    }

    outcome
}
