//! Retry-driven fetcher: drives one work item to success or exhaustion.
//!
//! Each item gets up to [`MAX_RETRIES`] attempts. A failed attempt is
//! retried immediately; there is no backoff because the batch is strictly
//! sequential and an operator is usually watching the log. Every attempt
//! rewrites the destination from scratch, but the file is only opened once
//! a success status has arrived, so a failed attempt never clobbers data
//! from an earlier run.
//!
//! A failure in the middle of the body stream can leave a truncated file
//! behind. It is deliberately not deleted: a later run will then skip the
//! file, which is the documented trade-off of filtering by existence.

use std::path::Path;

use futures_util::StreamExt;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, error, info, instrument};

use super::constants::{MAX_RETRIES, WRITE_BUFFER_BYTES};
use super::error::DownloadError;
use super::filter::WorkItem;
use super::transport::AuthTransport;

/// Downloads work items through an [`AuthTransport`] with bounded retries.
#[derive(Debug, Clone)]
pub struct Fetcher {
    transport: AuthTransport,
    max_retries: u32,
}

impl Fetcher {
    /// Creates a fetcher with the default attempt cap of [`MAX_RETRIES`].
    #[must_use]
    pub fn new(transport: AuthTransport) -> Self {
        Self::with_max_retries(transport, MAX_RETRIES)
    }

    /// Creates a fetcher with an explicit attempt cap (at least 1).
    #[must_use]
    pub fn with_max_retries(transport: AuthTransport, max_retries: u32) -> Self {
        Self {
            transport,
            max_retries: max_retries.max(1),
        }
    }

    /// Returns the configured attempt cap.
    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Downloads one item, retrying transient failures, and returns the
    /// number of bytes written on success.
    ///
    /// # Errors
    ///
    /// Returns the last attempt's error once the cap is reached, or the
    /// first non-retryable error (local IO) immediately.
    #[instrument(skip(self, item), fields(url = %item.url))]
    pub async fn fetch(&self, item: &WorkItem) -> Result<u64, DownloadError> {
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            debug!(attempt, "starting download attempt");

            match self.fetch_once(item).await {
                Ok(bytes) => {
                    info!(path = %item.dest.display(), bytes, "download complete");
                    return Ok(bytes);
                }
                Err(error) => {
                    error!(attempt, %error, "download attempt failed");

                    if !error.is_retryable() {
                        return Err(error);
                    }
                    if attempt >= self.max_retries {
                        error!(max_retries = self.max_retries, "max retries reached");
                        return Err(error);
                    }

                    info!(
                        next_attempt = attempt + 1,
                        max_retries = self.max_retries,
                        "retrying download"
                    );
                }
            }
        }
    }

    /// One attempt: request, then stream the body to disk.
    ///
    /// The destination is created (truncating any previous content) only
    /// after the transport has produced a success status, so status-level
    /// failures never touch the file.
    async fn fetch_once(&self, item: &WorkItem) -> Result<u64, DownloadError> {
        let response = self.transport.get(&item.url).await?;

        let file = File::create(&item.dest)
            .await
            .map_err(|e| DownloadError::io(item.dest.clone(), e))?;

        stream_to_file(file, response, item.url.as_str(), &item.dest).await
    }
}

/// Streams the response body to the file, returning bytes written.
async fn stream_to_file(
    file: File,
    response: reqwest::Response,
    url: &str,
    path: &Path,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::with_capacity(WRITE_BUFFER_BYTES, file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::network(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(path.to_path_buf(), e))?;

        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(path.to_path_buf(), e))?;

    Ok(bytes_written)
}
