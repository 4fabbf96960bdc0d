//! Authenticated HTTP transport with credential-safe redirect handling.
//!
//! Earthdata downloads bounce through the login service and back: a data
//! URL redirects to [`AUTH_HOST`], which authenticates and redirects to the
//! actual file host. Basic credentials must ride along for that whole
//! exchange, but must never follow a redirect onto an unrelated host.
//!
//! Rather than hooking the client's redirect engine, the client here is
//! built with redirects disabled and [`AuthTransport::get`] follows the
//! chain itself, deciding per hop whether the credentials travel on.

use std::fmt;
use std::time::Duration;

use reqwest::header::LOCATION;
use reqwest::redirect;
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, instrument};
use url::Url;

use super::constants::{
    AUTH_HOST, CONNECT_TIMEOUT_SECS, MAX_REDIRECTS, READ_TIMEOUT_SECS, USER_AGENT,
};
use super::error::DownloadError;

/// Username and password for the designated auth host.
///
/// Constructed once per run and shared read-only. `Debug` output redacts
/// the password so the secret can never reach a log line.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// HTTP transport that attaches Basic credentials and follows redirects
/// with the per-hop credential rule applied.
///
/// Created once per run and reused for every item, so connection pooling
/// and the session cookie jar carry across downloads. The first item pays
/// the full login round-trip; later items ride the session cookie.
#[derive(Debug, Clone)]
pub struct AuthTransport {
    client: Client,
    credentials: Credentials,
    auth_host: String,
}

impl AuthTransport {
    /// Creates a transport authenticating against [`AUTH_HOST`].
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::ClientBuild`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(credentials: Credentials) -> Result<Self, DownloadError> {
        Self::with_auth_host(credentials, AUTH_HOST)
    }

    /// Creates a transport with an explicit auth host.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::ClientBuild`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn with_auth_host(
        credentials: Credentials,
        auth_host: impl Into<String>,
    ) -> Result<Self, DownloadError> {
        let client = build_client().map_err(DownloadError::client_build)?;
        Ok(Self {
            client,
            credentials,
            auth_host: auth_host.into(),
        })
    }

    /// Returns the hostname credentials are trusted with across redirects.
    #[must_use]
    pub fn auth_host(&self) -> &str {
        &self.auth_host
    }

    /// Issues a GET for `url`, following redirects with the credential rule
    /// applied at every hop, and returns the final streaming response.
    ///
    /// Credentials are attached preemptively to the initial request. At each
    /// redirect they are carried forward unchanged while the chain stays on
    /// one host or touches the auth host; the first hop onto an unrelated
    /// host drops them for the remainder of the chain.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::Timeout`] or [`DownloadError::Network`] for
    /// transport failures, [`DownloadError::HttpStatus`] when the final
    /// status is not 2xx or a redirect lacks a usable `Location`, and
    /// [`DownloadError::TooManyRedirects`] when the chain exceeds
    /// [`MAX_REDIRECTS`] hops.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get(&self, url: &Url) -> Result<Response, DownloadError> {
        let mut current = url.clone();
        let mut send_credentials = true;
        let mut hops = 0u32;

        loop {
            let mut request = self.client.get(current.clone());
            if send_credentials {
                request = request.basic_auth(
                    self.credentials.username(),
                    Some(self.credentials.password()),
                );
            }

            let response = request.send().await.map_err(|e| {
                if e.is_timeout() {
                    DownloadError::timeout(current.as_str())
                } else {
                    DownloadError::network(current.as_str(), e)
                }
            })?;

            let status = response.status();
            if !is_redirect(status) {
                if !status.is_success() {
                    return Err(DownloadError::http_status(current.as_str(), status.as_u16()));
                }
                return Ok(response);
            }

            if hops == MAX_REDIRECTS {
                return Err(DownloadError::too_many_redirects(
                    url.as_str(),
                    MAX_REDIRECTS,
                ));
            }

            // A redirect status without a resolvable Location is terminal.
            let Some(next) = redirect_target(&response, &current) else {
                return Err(DownloadError::http_status(current.as_str(), status.as_u16()));
            };

            if send_credentials && should_strip_credentials(&current, &next, &self.auth_host) {
                debug!(from = %current, to = %next, "dropping credentials on cross-host redirect");
                send_credentials = false;
            }

            hops += 1;
            debug!(status = status.as_u16(), location = %next, hop = hops, "following redirect");
            current = next;
        }
    }
}

/// Whether credentials must be dropped when a redirect moves the request
/// from `previous` to `next`.
///
/// Hostnames are compared exactly as parsed (ports and schemes ignored).
/// The answer is yes only when the hosts differ and neither one is the
/// auth host.
fn should_strip_credentials(previous: &Url, next: &Url, auth_host: &str) -> bool {
    let from = previous.host_str();
    let to = next.host_str();
    from != to && from != Some(auth_host) && to != Some(auth_host)
}

/// Redirect statuses the transport follows, matching mainstream client
/// behavior: permanent and temporary moves plus see-other.
fn is_redirect(status: StatusCode) -> bool {
    matches!(status.as_u16(), 301 | 302 | 303 | 307 | 308)
}

/// Resolves the `Location` header against the current URL, supporting
/// relative targets. `None` when the header is absent or unusable.
fn redirect_target(response: &Response, current: &Url) -> Option<Url> {
    let location = response.headers().get(LOCATION)?.to_str().ok()?;
    current.join(location).ok()
}

fn build_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        // Redirects are followed manually in `get` so the credential rule
        // can run per hop.
        .redirect(redirect::Policy::none())
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .read_timeout(Duration::from_secs(READ_TIMEOUT_SECS))
        .cookie_store(true)
        .gzip(true)
        // Proxy bypass is scoped to this client; the process environment is
        // left alone.
        .no_proxy()
        .user_agent(USER_AGENT)
        .build()
}
