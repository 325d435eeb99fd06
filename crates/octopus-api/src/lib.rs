// octopus-api: Async Rust client for the Octopus Energy REST API (meters, tariffs, consumption)

pub mod client;
pub mod config;
mod consumption;
pub mod error;
mod meters;
pub mod pagination;
mod tariffs;
pub mod time;
pub mod transport;
pub mod types;
pub mod urls;

pub use client::OctopusClient;
pub use config::{ClientConfig, ClientConfigBuilder, ConfigSource, EnvSource, MeterConfig};
pub use error::Error;
pub use pagination::{Page, next_link, page_count};
pub use time::{Period, date_to_periods, format_timestamp};
pub use transport::TransportConfig;
pub use types::{Aggregate, ChargeType, DEFAULT_PAGE_SIZE, PageSpec, ResourceType};
pub use urls::{BASE_URL, ConsumptionOptions, Endpoints, TariffQuery};
