//! CLI error types with miette diagnostics.
//!
//! Maps `octopus_api::Error` and `octopus_config::ConfigError` into
//! user-facing errors with actionable help text and process exit codes.

use miette::Diagnostic;
use thiserror::Error;

use octopus_api::config::keys;
use octopus_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

/// Longest slice of a non-JSON body echoed back in help text.
const BODY_PREVIEW_CHARS: usize = 300;

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the Octopus Energy API at {url}")]
    #[diagnostic(
        code(octo::connection_failed),
        help("Check your network connection, or the --base-url you passed.")
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request to {url} timed out")]
    #[diagnostic(
        code(octo::timeout),
        help("Increase the timeout with --timeout, or pass --timeout 0 to disable it.")
    )]
    Timeout { url: String },

    #[error("Could not set up the HTTP client: {reason}")]
    #[diagnostic(code(octo::http_client))]
    HttpClient { reason: String },

    // ── Credentials ──────────────────────────────────────────────────
    #[error("No API key configured")]
    #[diagnostic(
        code(octo::no_credentials),
        help(
            "Pass --api-key, set {env}, or add api_key to your config file.\n\
             Find the config file with: octo config path"
        )
    )]
    NoCredentials { env: &'static str },

    #[error("Missing required setting {key}")]
    #[diagnostic(
        code(octo::missing_setting),
        help(
            "Set {key} in the environment, add {field} to your config file,\n\
             or pass it as --{flag}."
        )
    )]
    MissingSetting {
        key: String,
        field: String,
        flag: String,
    },

    // ── Response ─────────────────────────────────────────────────────
    #[error("Unexpected response from the API: {message}")]
    #[diagnostic(code(octo::unexpected_response), help("Response body began with:\n{preview}"))]
    UnexpectedResponse { message: String, preview: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(octo::validation))]
    Validation { field: String, reason: String },

    #[error("Invalid URL: {0}")]
    #[diagnostic(code(octo::invalid_url))]
    InvalidUrl(#[from] url::ParseError),

    #[error("Refusing to send the API key to {url}")]
    #[diagnostic(
        code(octo::foreign_host),
        help("Links are only followed under {base_url}. Pass --base-url to use another API root.")
    )]
    ForeignHost { url: String, base_url: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Config file already exists at {path}")]
    #[diagnostic(
        code(octo::config_exists),
        help("Pass --force to overwrite it, or edit it by hand.")
    )]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(code(octo::config))]
    Config(#[from] ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not render JSON: {0}")]
    #[diagnostic(code(octo::json))]
    Json(#[from] serde_json::Error),

    #[error("Could not render YAML: {0}")]
    #[diagnostic(code(octo::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl From<octopus_api::Error> for CliError {
    fn from(err: octopus_api::Error) -> Self {
        use octopus_api::Error as ApiError;

        match err {
            ApiError::Configuration { key } if key == keys::API_KEY => Self::NoCredentials {
                env: keys::API_KEY,
            },
            ApiError::Configuration { key } => missing_setting(key),
            ApiError::Transport(e) => {
                let url = e.url().map(ToString::to_string).unwrap_or_default();
                if e.is_timeout() {
                    Self::Timeout { url }
                } else {
                    Self::ConnectionFailed {
                        url,
                        source: Box::new(e),
                    }
                }
            }
            ApiError::InvalidUrl(e) => Self::InvalidUrl(e),
            ApiError::HttpClient(reason) => Self::HttpClient { reason },
            ApiError::ForeignHost { url, base_url } => Self::ForeignHost { url, base_url },
            ApiError::Deserialization { message, body } => Self::UnexpectedResponse {
                message,
                preview: preview(&body),
            },
        }
    }
}

/// `OCTOPUS_GAS_MPRN` -> config field `gas_mprn`, flag `gas-mprn`.
fn missing_setting(key: String) -> CliError {
    let field = key
        .strip_prefix(octopus_config::ENV_PREFIX)
        .unwrap_or(&key)
        .to_ascii_lowercase();
    let flag = field.replace('_', "-");
    CliError::MissingSetting { key, field, flag }
}

fn preview(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "(empty body)".into();
    }
    match trimmed.char_indices().nth(BODY_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_owned(),
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::HttpClient { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::NoCredentials { .. } => exit_code::AUTH,
            Self::MissingSetting { .. }
            | Self::Validation { .. }
            | Self::InvalidUrl(_)
            | Self::ForeignHost { .. }
            | Self::ConfigExists { .. } => exit_code::USAGE,
            Self::UnexpectedResponse { .. }
            | Self::Config(_)
            | Self::Io(_)
            | Self::Json(_)
            | Self::Yaml(_) => exit_code::GENERAL,
        }
    }
}
