// ── Client configuration ──
//
// Credentials and meter identifiers for one account. Values supplied on
// the builder win; anything missing is looked up in an injected
// `ConfigSource` (the process environment by default). The API crate never
// reads config files -- `octopus-config` layers those on top.

use std::collections::HashMap;

use secrecy::SecretString;

use crate::error::Error;
use crate::types::ResourceType;

/// Product code used when none is configured.
pub const DEFAULT_PRODUCT_CODE: &str = "AGILE-18-02-21";

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "C";

/// Configuration source keys.
pub mod keys {
    pub const API_KEY: &str = "OCTOPUS_API_KEY";
    pub const ELECTRICITY_SERIAL: &str = "OCTOPUS_ELECTRICITY_SERIAL";
    pub const ELECTRICITY_MPAN: &str = "OCTOPUS_ELECTRICITY_MPAN";
    pub const ELECTRICITY_PRODUCT_CODE: &str = "OCTOPUS_ELECTRICITY_PRODUCT_CODE";
    pub const ELECTRICITY_REGION: &str = "OCTOPUS_ELECTRICITY_REGION";
    pub const GAS_SERIAL: &str = "OCTOPUS_GAS_SERIAL";
    pub const GAS_MPRN: &str = "OCTOPUS_GAS_MPRN";
    pub const GAS_PRODUCT_CODE: &str = "OCTOPUS_GAS_PRODUCT_CODE";
    pub const GAS_REGION: &str = "OCTOPUS_GAS_REGION";
}

// ── Sources ──────────────────────────────────────────────────────────

/// Key/value lookup used to fill in values not set on the builder.
pub trait ConfigSource {
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads `OCTOPUS_*` variables from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSource;

impl ConfigSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl<S: ConfigSource + ?Sized> ConfigSource for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

// ── Resolved config ──────────────────────────────────────────────────

/// Identifiers for one supply's meter point and tariff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeterConfig {
    /// Meter serial number.
    pub serial: String,
    /// MPAN for electricity, MPRN for gas.
    pub point_id: String,
    pub product_code: String,
    pub region: String,
}

/// Immutable configuration owned by an `OctopusClient`.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    api_key: SecretString,
    electricity: MeterConfig,
    gas: MeterConfig,
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Resolve everything from the process environment.
    pub fn from_env() -> Result<Self, Error> {
        Self::builder().build_from(&EnvSource)
    }

    pub fn api_key(&self) -> &SecretString {
        &self.api_key
    }

    pub fn electricity(&self) -> &MeterConfig {
        &self.electricity
    }

    pub fn gas(&self) -> &MeterConfig {
        &self.gas
    }

    /// Meter identifiers for the given supply.
    pub fn meter(&self, resource_type: ResourceType) -> &MeterConfig {
        match resource_type {
            ResourceType::Electricity => &self.electricity,
            ResourceType::Gas => &self.gas,
        }
    }
}

// ── Builder ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
struct MeterOverrides {
    serial: Option<String>,
    point_id: Option<String>,
    product_code: Option<String>,
    region: Option<String>,
}

/// Collects explicit values, then resolves the rest against a source.
///
/// Empty strings count as unset, both on the builder and in the source.
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    api_key: Option<String>,
    electricity: MeterOverrides,
    gas: MeterOverrides,
}

impl ClientConfigBuilder {
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn electricity_serial(mut self, serial: impl Into<String>) -> Self {
        self.electricity.serial = Some(serial.into());
        self
    }

    pub fn electricity_mpan(mut self, mpan: impl Into<String>) -> Self {
        self.electricity.point_id = Some(mpan.into());
        self
    }

    pub fn electricity_product_code(mut self, code: impl Into<String>) -> Self {
        self.electricity.product_code = Some(code.into());
        self
    }

    pub fn electricity_region(mut self, region: impl Into<String>) -> Self {
        self.electricity.region = Some(region.into());
        self
    }

    pub fn gas_serial(mut self, serial: impl Into<String>) -> Self {
        self.gas.serial = Some(serial.into());
        self
    }

    pub fn gas_mprn(mut self, mprn: impl Into<String>) -> Self {
        self.gas.point_id = Some(mprn.into());
        self
    }

    pub fn gas_product_code(mut self, code: impl Into<String>) -> Self {
        self.gas.product_code = Some(code.into());
        self
    }

    pub fn gas_region(mut self, region: impl Into<String>) -> Self {
        self.gas.region = Some(region.into());
        self
    }

    /// Resolve missing values from the process environment.
    pub fn build(self) -> Result<ClientConfig, Error> {
        self.build_from(&EnvSource)
    }

    /// Resolve missing values from `source`.
    ///
    /// Fails with [`Error::Configuration`] naming the first required key
    /// that has no value anywhere.
    pub fn build_from<S: ConfigSource + ?Sized>(self, source: &S) -> Result<ClientConfig, Error> {
        let api_key = required(self.api_key, source, keys::API_KEY)?;

        let electricity = MeterConfig {
            serial: required(self.electricity.serial, source, keys::ELECTRICITY_SERIAL)?,
            point_id: required(self.electricity.point_id, source, keys::ELECTRICITY_MPAN)?,
            product_code: optional(
                self.electricity.product_code,
                source,
                keys::ELECTRICITY_PRODUCT_CODE,
                DEFAULT_PRODUCT_CODE,
            ),
            region: optional(
                self.electricity.region,
                source,
                keys::ELECTRICITY_REGION,
                DEFAULT_REGION,
            ),
        };

        let gas = MeterConfig {
            serial: required(self.gas.serial, source, keys::GAS_SERIAL)?,
            point_id: required(self.gas.point_id, source, keys::GAS_MPRN)?,
            product_code: optional(
                self.gas.product_code,
                source,
                keys::GAS_PRODUCT_CODE,
                DEFAULT_PRODUCT_CODE,
            ),
            region: optional(self.gas.region, source, keys::GAS_REGION, DEFAULT_REGION),
        };

        Ok(ClientConfig {
            api_key: SecretString::from(api_key),
            electricity,
            gas,
        })
    }
}

fn lookup<S: ConfigSource + ?Sized>(
    explicit: Option<String>,
    source: &S,
    key: &str,
) -> Option<String> {
    explicit
        .filter(|v| !v.is_empty())
        .or_else(|| source.get(key).filter(|v| !v.is_empty()))
}

fn required<S: ConfigSource + ?Sized>(
    explicit: Option<String>,
    source: &S,
    key: &str,
) -> Result<String, Error> {
    lookup(explicit, source, key).ok_or_else(|| Error::Configuration { key: key.into() })
}

fn optional<S: ConfigSource + ?Sized>(
    explicit: Option<String>,
    source: &S,
    key: &str,
    default: &str,
) -> String {
    lookup(explicit, source, key).unwrap_or_else(|| default.to_owned())
}
