//! Download failure taxonomy.
//!
//! Every variant carries the URL or path it relates to, so log lines stay
//! actionable without extra lookup. The split that matters operationally is
//! [`DownloadError::is_retryable`]: transport trouble earns another attempt,
//! local trouble does not.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fetching one file.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The request never produced a response (DNS, connect, TLS, or a
    /// connection dropped mid-body).
    #[error("network failure fetching {url}: {source}")]
    Network {
        /// URL of the failed request.
        url: String,
        /// What reqwest reported.
        #[source]
        source: reqwest::Error,
    },

    /// Connect or read deadline expired.
    #[error("timed out fetching {url}")]
    Timeout {
        /// URL of the request that timed out.
        url: String,
    },

    /// The server answered with a non-success status, or with a redirect
    /// the transport could not follow.
    #[error("server returned HTTP {status} for {url}")]
    HttpStatus {
        /// URL of the request.
        url: String,
        /// Status code as received.
        status: u16,
    },

    /// The redirect chain never reached a final response.
    #[error("redirect chain for {url} exceeded {limit} hops")]
    TooManyRedirects {
        /// URL the chain started from.
        url: String,
        /// The hop cap that was exceeded.
        limit: u32,
    },

    /// Creating, writing, or flushing the destination file failed.
    #[error("cannot write {path}: {source}")]
    Io {
        /// Destination path involved.
        path: PathBuf,
        /// The underlying filesystem error.
        #[source]
        source: std::io::Error,
    },

    /// The string is not a fetchable URL.
    #[error("not a fetchable URL: {url}")]
    InvalidUrl {
        /// The offending input.
        url: String,
    },

    /// The HTTP client itself could not be constructed.
    #[error("cannot build HTTP client: {source}")]
    ClientBuild {
        /// What the client builder reported.
        #[source]
        source: reqwest::Error,
    },
}

impl DownloadError {
    /// Network failure for `url`.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Timeout for `url`.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Non-success status for `url`.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Exceeded redirect cap starting from `url`.
    pub fn too_many_redirects(url: impl Into<String>, limit: u32) -> Self {
        Self::TooManyRedirects {
            url: url.into(),
            limit,
        }
    }

    /// Filesystem failure at `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Unusable URL string.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Client construction failure.
    pub fn client_build(source: reqwest::Error) -> Self {
        Self::ClientBuild { source }
    }

    /// Whether another attempt at the same download could plausibly succeed.
    ///
    /// Transport-level failures (network, timeout, bad status, runaway
    /// redirects) are retryable. Local IO failures and malformed URLs are
    /// not: retrying cannot fix a full disk or an unparseable address.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Network { .. }
                | Self::Timeout { .. }
                | Self::HttpStatus { .. }
                | Self::TooManyRedirects { .. }
        )
    }
}

// No `From<reqwest::Error>` or `From<std::io::Error>` impls: the variants
// need context (url, path) that the source errors cannot supply. The helper
// constructors keep that context mandatory at every call site.
