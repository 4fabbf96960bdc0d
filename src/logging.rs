//! Dual-sink logging: everything goes to stdout and to an append-only
//! log file in the working directory.
//!
//! File writes go through a non-blocking worker thread. The caller must
//! hold the returned [`WorkerGuard`] for the lifetime of the program;
//! dropping it flushes and stops the worker.

use std::fs::OpenOptions;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Default log file name, created in the working directory.
pub const LOG_FILE_NAME: &str = "download.log";

/// Installs the global subscriber with stdout and file layers.
///
/// The file is opened in append mode so successive runs accumulate in one
/// log. The filter defaults to `info` and can be overridden with
/// `RUST_LOG`.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init(log_path: &Path) -> Result<WorkerGuard, std::io::Error> {
    let log_file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(log_path)?;

    let (file_writer, guard) = tracing_appender::non_blocking(log_file);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stdout))
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .init();

    Ok(guard)
}
