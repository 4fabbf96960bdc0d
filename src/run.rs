//! The run driver: one end-to-end batch from URL list to saved files.
//!
//! A run is strictly sequential. Items are processed in list order, one at
//! a time, and a failed item never aborts the batch; it is counted and the
//! run moves on. The only fatal conditions are the ones that make the
//! whole batch meaningless: an unreadable or empty URL list, an unusable
//! save directory, or an HTTP client that cannot be built.

use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use thiserror::Error;
use tracing::{error, info};

use crate::download::{AUTH_HOST, AuthTransport, Credentials, DownloadError, Fetcher, build_queue};
use crate::list::{self, ListError};

/// Everything a run needs, assembled by the caller.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory downloaded files are written to. Created if missing.
    pub save_dir: PathBuf,
    /// Path to the URL list file.
    pub list_path: PathBuf,
    /// Credentials sent preemptively with each request.
    pub credentials: Credentials,
    /// Host that is always trusted with credentials across redirects.
    pub auth_host: String,
}

impl RunConfig {
    /// Creates a config with the default Earthdata auth host.
    #[must_use]
    pub fn new(
        save_dir: impl Into<PathBuf>,
        list_path: impl Into<PathBuf>,
        credentials: Credentials,
    ) -> Self {
        Self {
            save_dir: save_dir.into(),
            list_path: list_path.into(),
            credentials,
            auth_host: AUTH_HOST.to_string(),
        }
    }
}

/// Fatal errors that abort a run before or during setup.
#[derive(Debug, Error)]
pub enum RunError {
    /// The URL list could not be loaded.
    #[error("URL list error: {0}")]
    List(#[from] ListError),

    /// The save directory could not be created.
    #[error("failed to create save directory {path}: {source}")]
    SaveDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(#[from] DownloadError),
}

/// Counters from a completed run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    /// Usable entries read from the URL list.
    pub requested: usize,
    /// Entries skipped because the destination file already existed.
    pub skipped: usize,
    /// Entries dropped because no URL or filename could be derived.
    pub invalid: usize,
    /// Items downloaded successfully.
    pub downloaded: usize,
    /// Items that exhausted their attempts or hit a local failure.
    pub failed: usize,
}

impl RunStats {
    /// Number of items that actually went through the fetcher.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.downloaded + self.failed
    }
}

/// Executes one batch run and returns its counters.
///
/// Per-item failures are logged and counted but do not abort the run; the
/// returned stats distinguish them from successes.
///
/// # Errors
///
/// Returns [`RunError::SaveDir`] if the save directory cannot be created,
/// [`RunError::List`] if the URL list is unreadable or empty, and
/// [`RunError::Client`] if the HTTP client cannot be built.
pub async fn run(config: RunConfig) -> Result<RunStats, RunError> {
    tokio::fs::create_dir_all(&config.save_dir)
        .await
        .map_err(|e| RunError::SaveDir {
            path: config.save_dir.clone(),
            source: e,
        })?;

    let urls = list::load_urls(&config.list_path)?;
    let requested = urls.len();

    let outcome = build_queue(&urls, &config.save_dir);
    info!(
        queued = outcome.queue.len(),
        skipped = outcome.skipped,
        invalid = outcome.invalid,
        "queue built"
    );

    let transport = AuthTransport::with_auth_host(config.credentials, config.auth_host)?;
    let fetcher = Fetcher::new(transport);

    let mut stats = RunStats {
        requested,
        skipped: outcome.skipped,
        invalid: outcome.invalid,
        ..RunStats::default()
    };

    // Progress goes to stderr, so it never interleaves with stdout logs.
    let bar = ProgressBar::new(outcome.queue.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("[{pos}/{len}] {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    for item in &outcome.queue {
        bar.set_message(item.file_name.clone());

        match fetcher.fetch(item).await {
            Ok(_) => stats.downloaded += 1,
            Err(error) => {
                error!(url = %item.url, %error, "giving up on file");
                stats.failed += 1;
            }
        }

        bar.inc(1);
    }

    bar.finish_and_clear();

    info!(
        downloaded = stats.downloaded,
        failed = stats.failed,
        skipped = stats.skipped,
        invalid = stats.invalid,
        requested = stats.requested,
        "run complete"
    );

    Ok(stats)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_attempted_sums_downloads_and_failures() {
        let stats = RunStats {
            requested: 10,
            skipped: 2,
            invalid: 1,
            downloaded: 4,
            failed: 3,
        };
        assert_eq!(stats.attempted(), 7);
    }

    #[test]
    fn test_run_config_defaults_to_earthdata_auth_host() {
        let config = RunConfig::new("/tmp/out", "/tmp/list.txt", Credentials::new("u", "p"));
        assert_eq!(config.auth_host, AUTH_HOST);
    }
}
