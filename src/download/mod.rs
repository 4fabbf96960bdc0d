//! Authenticated bulk download pipeline.
//!
//! The pipeline has three stages wired together by [`crate::run::run`]:
//!
//! 1. [`build_queue`] turns raw URL strings into [`WorkItem`]s, dropping
//!    entries whose destination file already exists.
//! 2. [`AuthTransport`] issues GET requests with preemptive basic auth and
//!    follows redirects by hand so credentials can be stripped when a hop
//!    leaves the trusted host.
//! 3. [`Fetcher`] drives each item through bounded retries and streams the
//!    body to disk.
//!
//! The stages are usable on their own:
//!
//! ```no_run
//! use std::path::Path;
//!
//! use earthfetch_core::download::{AuthTransport, Credentials, Fetcher, build_queue};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let urls = vec!["https://example.com/data/granule.nc".to_string()];
//! let outcome = build_queue(&urls, Path::new("/data"));
//!
//! let transport = AuthTransport::new(Credentials::new("user", "pass"))?;
//! let fetcher = Fetcher::new(transport);
//!
//! for item in &outcome.queue {
//!     fetcher.fetch(item).await?;
//! }
//! # Ok(())
//! # }
//! ```

mod constants;
mod error;
mod fetcher;
mod filename;
mod filter;
mod transport;

pub use constants::{
    AUTH_HOST, CONNECT_TIMEOUT_SECS, MAX_REDIRECTS, MAX_RETRIES, READ_TIMEOUT_SECS, USER_AGENT,
    WRITE_BUFFER_BYTES,
};
pub use error::DownloadError;
pub use fetcher::Fetcher;
pub use filter::{FilterOutcome, WorkItem, build_queue};
pub use transport::{AuthTransport, Credentials};
