//! Constants for the download module (auth host, timeouts, retry and redirect caps).

/// Hostname of the NASA Earthdata Login service.
///
/// Credentials stay attached on redirects into or out of this host; any
/// other cross-host redirect drops them.
pub const AUTH_HOST: &str = "urs.earthdata.nasa.gov";

/// Fixed User-Agent sent with every request.
pub const USER_AGENT: &str = concat!("earthfetch/", env!("CARGO_PKG_VERSION"));

/// Maximum download attempts per file, including the first.
pub const MAX_RETRIES: u32 = 5;

/// HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// HTTP read timeout between body chunks (30 seconds).
///
/// This is an idle limit, not a whole-request deadline: large files may
/// legitimately stream for longer than any fixed total timeout.
pub const READ_TIMEOUT_SECS: u64 = 30;

/// Buffer size for streaming writes to disk (1 MiB).
pub const WRITE_BUFFER_BYTES: usize = 1024 * 1024;

/// Maximum redirects followed for a single request before giving up.
pub const MAX_REDIRECTS: u32 = 30;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_carries_crate_version() {
        assert!(USER_AGENT.starts_with("earthfetch/"));
        assert!(USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_retry_and_redirect_caps() {
        assert_eq!(MAX_RETRIES, 5);
        assert_eq!(MAX_REDIRECTS, 30);
    }
}
