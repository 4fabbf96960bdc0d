//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

/// Bulk download NASA Earthdata granules from a URL list.
///
/// Earthfetch reads a plain-text list of URLs, skips files already present
/// in the save directory, and downloads the rest sequentially using
/// Earthdata Login credentials.
#[derive(Parser)]
#[command(name = "earthfetch")]
#[command(author, version, about)]
pub struct Args {
    /// Directory to save downloaded files into (created if missing)
    #[arg(long, value_name = "DIR")]
    pub save_dir: PathBuf,

    /// Earthdata Login username
    #[arg(long)]
    pub username: String,

    /// Earthdata Login password
    #[arg(long)]
    pub password: String,

    /// Path to the text file listing URLs to download
    #[arg(long, value_name = "FILE")]
    pub txt_dir: PathBuf,
}

// Manual Debug so the password never reaches a log line.
impl std::fmt::Debug for Args {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Args")
            .field("save_dir", &self.save_dir)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("txt_dir", &self.txt_dir)
            .finish()
    }
}
