use thiserror::Error;

/// Top-level error type for the `octopus-api` crate.
///
/// The remote API reports its own failures (unknown MPAN, bad product code,
/// expired key) as ordinary JSON bodies. Those are returned to the caller as
/// values, so this enum only covers configuration, transport, and decoding.
#[derive(Debug, Error)]
pub enum Error {
    // ── Configuration ───────────────────────────────────────────────
    /// A required credential or meter identifier was neither supplied
    /// explicitly nor found in the configuration source.
    #[error("Missing required configuration value: {key}")]
    Configuration { key: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error (bad base URL or a malformed `next` link).
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be constructed.
    #[error("Could not build HTTP client: {0}")]
    HttpClient(String),

    /// A link pointed outside the API root. Requests carry the API key, so
    /// they are only sent to the configured scheme, host and port.
    #[error("Refusing to follow {url}: it is not under {base_url}")]
    ForeignHost { url: String, base_url: String },

    // ── Data ────────────────────────────────────────────────────────
    /// Response body was not valid JSON, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if a required configuration value was missing.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }

    /// Returns `true` if this is a transient error worth retrying.
    ///
    /// The client itself never retries; this is a hint for callers.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Returns `true` if the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_error_names_the_key() {
        let err = Error::Configuration {
            key: "OCTOPUS_GAS_MPRN".into(),
        };
        assert!(err.is_configuration());
        assert!(!err.is_transient());
        assert_eq!(
            err.to_string(),
            "Missing required configuration value: OCTOPUS_GAS_MPRN"
        );
    }

    #[test]
    fn deserialization_error_is_not_transient() {
        let err = Error::Deserialization {
            message: "expected value at line 1 column 1".into(),
            body: "<html>".into(),
        };
        assert!(!err.is_transient());
        assert!(!err.is_timeout());
    }

    #[test]
    fn client_build_failure_message() {
        let err = Error::HttpClient("builder error".into());
        assert_eq!(err.to_string(), "Could not build HTTP client: builder error");
        assert!(!err.is_transient());
    }

    #[test]
    fn foreign_host_names_both_urls() {
        let err = Error::ForeignHost {
            url: "https://elsewhere.test/page=2".into(),
            base_url: "https://api.octopus.energy/v1".into(),
        };
        let text = err.to_string();
        assert!(text.contains("elsewhere.test"), "{text}");
        assert!(text.contains("api.octopus.energy"), "{text}");
    }
}
