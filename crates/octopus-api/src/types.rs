// Request vocabulary
//
// Closed enumerations that select endpoints and query values. Wire strings
// come from strum so the same names are used for URLs, CLI parsing, and
// display.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

// ── Resource type ────────────────────────────────────────────────────

/// Which supply a request is about. Selects the meter identifiers and
/// URL template.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ResourceType {
    Gas,
    Electricity,
}

impl ResourceType {
    /// Unit in which the API reports consumption for this supply.
    ///
    /// SMETS2 gas meters report volume, not energy.
    pub fn consumption_unit(self) -> &'static str {
        match self {
            Self::Electricity => "kWh",
            Self::Gas => "m³",
        }
    }
}

// ── Charge type ──────────────────────────────────────────────────────

/// Tariff charge category. Used only as the final path segment of a
/// tariff data URL.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum ChargeType {
    StandingCharges,
    StandardUnitRates,
    DayUnitRates,
    NightUnitRates,
}

// ── Aggregate ────────────────────────────────────────────────────────

/// Consumption aggregation granularity.
///
/// `HalfHourly` is the API's native resolution and has no `group_by`
/// value: it is expressed by leaving the parameter out.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(ascii_case_insensitive)]
pub enum Aggregate {
    #[default]
    #[strum(to_string = "half-hour", serialize = "half-hourly")]
    HalfHourly,
    #[strum(to_string = "hour", serialize = "hourly")]
    Hourly,
    #[strum(to_string = "day", serialize = "daily")]
    Daily,
    #[strum(to_string = "week", serialize = "weekly")]
    Weekly,
    #[strum(to_string = "month", serialize = "monthly")]
    Monthly,
    #[strum(to_string = "quarter", serialize = "quarterly")]
    Quarterly,
}

impl Aggregate {
    /// The `group_by` query value, or `None` for half-hourly data.
    pub fn group_by(self) -> Option<&'static str> {
        match self {
            Self::HalfHourly => None,
            Self::Hourly => Some("hour"),
            Self::Daily => Some("day"),
            Self::Weekly => Some("week"),
            Self::Monthly => Some("month"),
            Self::Quarterly => Some("quarter"),
        }
    }
}

// ── Pagination ───────────────────────────────────────────────────────

/// Page size used when the caller does not choose one (100).
pub const DEFAULT_PAGE_SIZE: NonZeroU32 = NonZeroU32::MIN.saturating_add(99);

/// Page selection for list endpoints.
///
/// `page: None` requests the first page; the API numbers pages from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    pub page_size: NonZeroU32,
    pub page: Option<NonZeroU32>,
}

impl Default for PageSpec {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page: None,
        }
    }
}

impl PageSpec {
    /// First page with the given page size.
    pub fn with_size(page_size: NonZeroU32) -> Self {
        Self {
            page_size,
            page: None,
        }
    }

    /// Select a specific page.
    pub fn page(mut self, page: NonZeroU32) -> Self {
        self.page = Some(page);
        self
    }
}
