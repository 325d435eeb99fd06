//! Layered configuration for Octopus Energy tools.
//!
//! Settings are merged from built-in defaults, a TOML file at the platform
//! config path, and `OCTOPUS_*` environment variables, in that order. The
//! result plugs into `octopus_api::ClientConfig` through `ConfigSource`, so
//! the API crate's required/default rules apply unchanged.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use octopus_api::config::keys;
use octopus_api::{ConfigSource, TransportConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix shared by every environment variable this crate reads.
pub const ENV_PREFIX: &str = "OCTOPUS_";

const REDACTED: &str = "********";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Settings ────────────────────────────────────────────────────────

/// Flat settings table. Field names are the `OCTOPUS_*` keys lower-cased
/// without the prefix, so the same name works in the file and the
/// environment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    /// API key (plaintext; prefer `OCTOPUS_API_KEY`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub electricity_serial: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub electricity_mpan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub electricity_product_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub electricity_region: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_serial: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_mprn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_product_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_region: Option<String>,

    /// Alternative API root, mostly for proxies and mock servers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Whole-request timeout in seconds. `0` disables it.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

fn default_timeout() -> u64 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            electricity_serial: None,
            electricity_mpan: None,
            electricity_product_code: None,
            electricity_region: None,
            gas_serial: None,
            gas_mprn: None,
            gas_product_code: None,
            gas_region: None,
            base_url: None,
            timeout: default_timeout(),
        }
    }
}

impl Settings {
    /// HTTP transport settings derived from `timeout`.
    pub fn transport(&self) -> TransportConfig {
        let transport = TransportConfig::default();
        if self.timeout == 0 {
            transport
        } else {
            transport.with_timeout(Duration::from_secs(self.timeout))
        }
    }

    /// Copy with the API key masked, for display.
    pub fn redacted(&self) -> Self {
        Self {
            api_key: self.api_key.as_ref().map(|_| REDACTED.to_owned()),
            ..self.clone()
        }
    }

    fn field(&self, key: &str) -> Option<&String> {
        match key {
            keys::API_KEY => self.api_key.as_ref(),
            keys::ELECTRICITY_SERIAL => self.electricity_serial.as_ref(),
            keys::ELECTRICITY_MPAN => self.electricity_mpan.as_ref(),
            keys::ELECTRICITY_PRODUCT_CODE => self.electricity_product_code.as_ref(),
            keys::ELECTRICITY_REGION => self.electricity_region.as_ref(),
            keys::GAS_SERIAL => self.gas_serial.as_ref(),
            keys::GAS_MPRN => self.gas_mprn.as_ref(),
            keys::GAS_PRODUCT_CODE => self.gas_product_code.as_ref(),
            keys::GAS_REGION => self.gas_region.as_ref(),
            _ => None,
        }
    }
}

impl ConfigSource for Settings {
    fn get(&self, key: &str) -> Option<String> {
        self.field(key).cloned()
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("energy", "octopus", "octo").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("octo");
    p
}

// ── Loading ─────────────────────────────────────────────────────────

/// Load settings from the default config path and the environment.
pub fn load_settings() -> Result<Settings, ConfigError> {
    load_settings_from(&config_path())
}

/// Load settings from `path` and the environment.
///
/// A missing file is not an error; defaults and environment still apply.
pub fn load_settings_from(path: &Path) -> Result<Settings, ConfigError> {
    let settings = Figment::new()
        .merge(Serialized::defaults(Settings::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).only(&["timeout"]))
        .merge(Serialized::defaults(env_strings()))
        .extract()?;
    Ok(settings)
}

/// Every `OCTOPUS_*` variable except the timeout, as the raw string.
///
/// `Env` parses values, which turns an MPRN like `0987654321` into a number
/// and loses the leading zero. Identifiers must reach `Settings` verbatim.
fn env_strings() -> BTreeMap<String, String> {
    Env::prefixed(ENV_PREFIX)
        .ignore(&["timeout"])
        .iter()
        .map(|(key, value)| (key.as_str().to_ascii_lowercase(), value))
        .collect()
}

// ── Saving ──────────────────────────────────────────────────────────

/// Serialize settings to TOML at `path`, creating parent directories.
pub fn save_settings(settings: &Settings, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(settings)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}
