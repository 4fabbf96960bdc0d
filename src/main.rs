//! CLI entry point for the earthfetch tool.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use earthfetch_core::{Credentials, RunConfig, logging, run};
use tracing::{debug, error, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse before installing tracing so --help and usage errors stay quiet.
    let args = Args::parse();

    // The guard keeps the log file worker alive until main returns.
    let _guard = logging::init(Path::new(logging::LOG_FILE_NAME))
        .with_context(|| format!("failed to open {}", logging::LOG_FILE_NAME))?;

    debug!(?args, "parsed arguments");
    info!(version = env!("CARGO_PKG_VERSION"), "earthfetch starting");

    let credentials = Credentials::new(args.username, args.password);
    let config = RunConfig::new(args.save_dir, args.txt_dir, credentials);

    // Log fatal errors before returning them so they reach the log file,
    // not just stderr.
    let stats = match run(config).await {
        Ok(stats) => stats,
        Err(error) => {
            error!(%error, "run aborted");
            return Err(error.into());
        }
    };

    // Per-file failures are already logged; they do not fail the process.
    info!(
        downloaded = stats.downloaded,
        skipped = stats.skipped,
        failed = stats.failed,
        invalid = stats.invalid,
        "all downloads processed"
    );

    Ok(())
}
