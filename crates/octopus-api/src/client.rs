// Octopus Energy API HTTP client
//
// Wraps `reqwest::Client` with the account configuration, API-key Basic
// auth, and verbatim JSON decoding. Endpoint operations live as inherent
// methods in meters.rs, tariffs.rs, consumption.rs and pagination.rs.

use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::Error;
use crate::transport::TransportConfig;
use crate::urls::{BASE_URL, Endpoints};

/// Client for the Octopus Energy REST API.
///
/// Holds an immutable [`ClientConfig`] and never mutates itself, so a
/// shared reference can be used from any number of tasks. Every operation
/// is one GET; responses come back as `serde_json::Value` exactly as the
/// server sent them, including error bodies on non-2xx statuses.
#[derive(Debug, Clone)]
pub struct OctopusClient {
    http: reqwest::Client,
    base_url: String,
    config: ClientConfig,
}

impl OctopusClient {
    /// Create a client from a `TransportConfig`.
    pub fn new(config: ClientConfig, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, config))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, config: ClientConfig) -> Self {
        Self {
            http,
            base_url: BASE_URL.to_owned(),
            config,
        }
    }

    /// Point the client at a different API root (a mock server, a proxy).
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, Error> {
        Url::parse(base_url)?;
        base_url.trim_end_matches('/').clone_into(&mut self.base_url);
        Ok(self)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The API root every endpoint URL is built from.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL builder bound to this client's base URL and configuration.
    pub fn endpoints(&self) -> Endpoints<'_> {
        Endpoints::new(&self.base_url, &self.config)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Authenticated GET, returning the body parsed as JSON.
    ///
    /// The API key is the Basic-auth username with a trailing `:` and the
    /// password is empty. The status code is not inspected: any body that
    /// parses as JSON is returned.
    pub async fn fetch(&self, url: Url) -> Result<Value, Error> {
        debug!("GET {url}");

        let username = format!("{}:", self.config.api_key().expose_secret());
        let resp = self
            .http
            .get(url)
            .basic_auth(username, Some(""))
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;
        debug!(status = status.as_u16(), bytes = body.len(), "response received");

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }

    /// Fetch an absolute URL given as a string (e.g. a `next` link).
    ///
    /// The URL must share scheme, host and port with the base URL, otherwise
    /// `Error::ForeignHost` is returned and nothing is sent.
    pub async fn fetch_str(&self, url: &str) -> Result<Value, Error> {
        let url = Url::parse(url)?;
        self.check_origin(&url)?;
        self.fetch(url).await
    }

    fn check_origin(&self, url: &Url) -> Result<(), Error> {
        let base = Url::parse(&self.base_url)?;
        if url.origin() == base.origin() {
            Ok(())
        } else {
            warn!(%url, base_url = %self.base_url, "refusing link to another host");
            Err(Error::ForeignHost {
                url: url.to_string(),
                base_url: self.base_url.clone(),
            })
        }
    }
}
