//! CLI-side configuration: merges `GlobalOpts` flags over the settings
//! loaded by `octopus-config`, then builds the API client.
//!
//! Precedence, highest first: flags, `OCTOPUS_*` environment, config file,
//! built-in defaults.

use std::path::PathBuf;

use octopus_api::{ClientConfig, ClientConfigBuilder, OctopusClient};
use octopus_config::Settings;
use tracing::debug;

use crate::cli::{AccountOpts, GlobalOpts};
use crate::error::CliError;

/// The config file this invocation reads: `--config` or the platform default.
pub fn config_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(octopus_config::config_path)
}

/// Load settings from the config file and environment.
pub fn load_settings(global: &GlobalOpts) -> Result<Settings, CliError> {
    let path = config_path(global);
    debug!(path = %path.display(), "loading settings");
    Ok(octopus_config::load_settings_from(&path)?)
}

/// Apply flag overrides to a `Settings` value (used by `config init`).
pub fn apply_overrides(settings: &mut Settings, global: &GlobalOpts) {
    let account = &global.account;
    let pairs = [
        (&mut settings.api_key, &account.api_key),
        (&mut settings.electricity_serial, &account.electricity_serial),
        (&mut settings.electricity_mpan, &account.electricity_mpan),
        (
            &mut settings.electricity_product_code,
            &account.electricity_product_code,
        ),
        (&mut settings.electricity_region, &account.electricity_region),
        (&mut settings.gas_serial, &account.gas_serial),
        (&mut settings.gas_mprn, &account.gas_mprn),
        (&mut settings.gas_product_code, &account.gas_product_code),
        (&mut settings.gas_region, &account.gas_region),
        (&mut settings.base_url, &global.base_url),
    ];
    for (slot, value) in pairs {
        if let Some(v) = value {
            *slot = Some(v.clone());
        }
    }
    if let Some(timeout) = global.timeout {
        settings.timeout = timeout;
    }
}

/// Builder preloaded with the account flags; anything unset falls through
/// to the settings when built.
fn builder(account: &AccountOpts) -> ClientConfigBuilder {
    let mut b = ClientConfig::builder();
    if let Some(v) = &account.api_key {
        b = b.api_key(v);
    }
    if let Some(v) = &account.electricity_serial {
        b = b.electricity_serial(v);
    }
    if let Some(v) = &account.electricity_mpan {
        b = b.electricity_mpan(v);
    }
    if let Some(v) = &account.electricity_product_code {
        b = b.electricity_product_code(v);
    }
    if let Some(v) = &account.electricity_region {
        b = b.electricity_region(v);
    }
    if let Some(v) = &account.gas_serial {
        b = b.gas_serial(v);
    }
    if let Some(v) = &account.gas_mprn {
        b = b.gas_mprn(v);
    }
    if let Some(v) = &account.gas_product_code {
        b = b.gas_product_code(v);
    }
    if let Some(v) = &account.gas_region {
        b = b.gas_region(v);
    }
    b
}

/// Resolve the full client configuration for this invocation.
pub fn client_config(global: &GlobalOpts, settings: &Settings) -> Result<ClientConfig, CliError> {
    Ok(builder(&global.account).build_from(settings)?)
}

/// Build an `OctopusClient` from flags and settings.
pub fn build_client(global: &GlobalOpts, settings: &Settings) -> Result<OctopusClient, CliError> {
    let config = client_config(global, settings)?;

    let mut transport_settings = settings.clone();
    if let Some(timeout) = global.timeout {
        transport_settings.timeout = timeout;
    }
    let mut client = OctopusClient::new(config, &transport_settings.transport())?;

    if let Some(base_url) = global.base_url.as_deref().or(settings.base_url.as_deref()) {
        debug!(base_url, "overriding API root");
        client = client.with_base_url(base_url)?;
    }
    Ok(client)
}
