//! Earthfetch Core Library
//!
//! This library provides the core functionality for the earthfetch tool,
//! which bulk-downloads NASA Earthdata granules from a plain-text URL list
//! using Earthdata Login credentials.
//!
//! # Architecture
//!
//! The pipeline runs through four modules:
//! - [`list`] - URL list file loading
//! - [`download`] - Queue building, authenticated transport, and the
//!   retry-driven fetcher
//! - [`run`] - The sequential run driver tying the stages together
//! - [`logging`] - Dual stdout/file tracing setup

// Library code must propagate errors rather than panic.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod download;
pub mod list;
pub mod logging;
pub mod run;

// Flatten the API surface for binary and test consumers.
pub use download::{
    AUTH_HOST, AuthTransport, Credentials, DownloadError, Fetcher, FilterOutcome, MAX_RETRIES,
    WorkItem, build_queue,
};
pub use list::{ListError, load_urls};
pub use run::{RunConfig, RunError, RunStats, run};
