// Endpoint URL construction
//
// Pure mapping from (resource type, configured identifiers, query options)
// to request URLs. Query parameters are emitted in a fixed order and
// optional ones are left out entirely rather than sent empty.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use url::Url;

use crate::config::ClientConfig;
use crate::error::Error;
use crate::time::{Period, format_timestamp};
use crate::types::{Aggregate, ChargeType, PageSpec, ResourceType};

/// Public API root.
pub const BASE_URL: &str = "https://api.octopus.energy/v1";

// ── Query options ────────────────────────────────────────────────────

/// Parameters for a tariff charge listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TariffQuery {
    pub charge_type: ChargeType,
    pub period_from: Option<DateTime<Utc>>,
    pub period_to: Option<DateTime<Utc>>,
    pub page: PageSpec,
}

impl TariffQuery {
    pub fn new(charge_type: ChargeType) -> Self {
        Self {
            charge_type,
            period_from: None,
            period_to: None,
            page: PageSpec::default(),
        }
    }

    pub fn period_from(mut self, from: DateTime<Utc>) -> Self {
        self.period_from = Some(from);
        self
    }

    pub fn period_to(mut self, to: DateTime<Utc>) -> Self {
        self.period_to = Some(to);
        self
    }

    /// Set both bounds at once.
    pub fn period(self, period: Period) -> Self {
        self.period_from(period.from).period_to(period.to)
    }

    pub fn page(mut self, page: PageSpec) -> Self {
        self.page = page;
        self
    }
}

/// Ordering, paging, and aggregation for consumption listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsumptionOptions {
    /// Newest first (`order_by=-period`).
    pub reverse_order: bool,
    pub page: PageSpec,
    pub group_by: Aggregate,
}

impl ConsumptionOptions {
    pub fn reversed(mut self, reverse_order: bool) -> Self {
        self.reverse_order = reverse_order;
        self
    }

    pub fn page(mut self, page: PageSpec) -> Self {
        self.page = page;
        self
    }

    pub fn group_by(mut self, group_by: Aggregate) -> Self {
        self.group_by = group_by;
        self
    }

    fn order_by(&self) -> &'static str {
        if self.reverse_order { "-period" } else { "period" }
    }
}

// ── Builder ──────────────────────────────────────────────────────────

/// Builds endpoint URLs for one account.
///
/// Borrowing, stateless, and cheap to construct per call.
#[derive(Debug, Clone, Copy)]
pub struct Endpoints<'a> {
    base: &'a str,
    config: &'a ClientConfig,
}

impl<'a> Endpoints<'a> {
    /// `base` is the API root, with or without a trailing slash.
    pub fn new(base: &'a str, config: &'a ClientConfig) -> Self {
        Self {
            base: base.trim_end_matches('/'),
            config,
        }
    }

    /// `{base}/electricity-meter-points/{mpan}` or `{base}/gas-meter-points/{mprn}`
    pub fn meter_url(&self, resource_type: ResourceType) -> Result<Url, Error> {
        parse(&self.meter_path(resource_type))
    }

    /// `{base}/products/{code}/{kind}-tariffs/E-1R-{code}-{region}`
    ///
    /// The `E-1R-` tariff prefix is used for gas too; that is the shape the
    /// API publishes single-register tariff codes under.
    pub fn tariff_url(&self, resource_type: ResourceType) -> Result<Url, Error> {
        parse(&self.tariff_path(resource_type))
    }

    /// `{meter_url}/meters/{serial}/consumption`
    pub fn consumption_url(&self, resource_type: ResourceType) -> Result<Url, Error> {
        parse(&self.consumption_path(resource_type))
    }

    /// `{base}/industry/grid-supply-points[?postcode=...]`
    pub fn grid_supply_points_url(&self, postcode: Option<&str>) -> Result<Url, Error> {
        let path = format!("{}/industry/grid-supply-points", self.base);
        let params: Vec<(&str, String)> = postcode
            .map(|p| ("postcode", urlencoding::encode(p).into_owned()))
            .into_iter()
            .collect();
        parse(&with_query(path, &params))
    }

    /// `{tariff_url}/{charge}?page_size=N[&page=P][&period_from=F][&period_to=T]`
    pub fn tariff_data_url(
        &self,
        resource_type: ResourceType,
        query: &TariffQuery,
    ) -> Result<Url, Error> {
        let path = format!("{}/{}", self.tariff_path(resource_type), query.charge_type);

        let mut params = vec![("page_size", query.page.page_size.to_string())];
        if let Some(page) = query.page.page {
            params.push(("page", page.to_string()));
        }
        if let Some(from) = query.period_from {
            params.push(("period_from", format_timestamp(&from)));
        }
        if let Some(to) = query.period_to {
            params.push(("period_to", format_timestamp(&to)));
        }

        parse(&with_query(path, &params))
    }

    /// `{consumption_url}?period_from=F&period_to=T&order_by=O&page_size=N[&page=P][&group_by=G]`
    pub fn consumption_data_url(
        &self,
        resource_type: ResourceType,
        period: &Period,
        options: &ConsumptionOptions,
    ) -> Result<Url, Error> {
        let path = self.consumption_path(resource_type);

        let mut params = vec![
            ("period_from", format_timestamp(&period.from)),
            ("period_to", format_timestamp(&period.to)),
            ("order_by", options.order_by().to_owned()),
            ("page_size", options.page.page_size.to_string()),
        ];
        if let Some(page) = options.page.page {
            params.push(("page", page.to_string()));
        }
        if let Some(group_by) = options.group_by.group_by() {
            params.push(("group_by", group_by.to_owned()));
        }

        parse(&with_query(path, &params))
    }

    // ── Paths ────────────────────────────────────────────────────────
    //
    // Configured identifiers are percent-encoded, so a stray `/`, `?` or `#`
    // stays inside its own segment.

    fn meter_path(&self, resource_type: ResourceType) -> String {
        let meter = self.config.meter(resource_type);
        format!(
            "{}/{resource_type}-meter-points/{}",
            self.base,
            segment(&meter.point_id)
        )
    }

    fn tariff_path(&self, resource_type: ResourceType) -> String {
        let meter = self.config.meter(resource_type);
        let code = segment(&meter.product_code);
        format!(
            "{}/products/{code}/{resource_type}-tariffs/E-1R-{code}-{}",
            self.base,
            segment(&meter.region)
        )
    }

    fn consumption_path(&self, resource_type: ResourceType) -> String {
        let serial = segment(&self.config.meter(resource_type).serial);
        format!(
            "{}/meters/{serial}/consumption",
            self.meter_path(resource_type)
        )
    }
}

fn segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

/// Append `key=value` pairs in order. Values must already be URL-safe.
fn with_query(mut path: String, params: &[(&str, String)]) -> String {
    for (i, (key, value)) in params.iter().enumerate() {
        path.push(if i == 0 { '?' } else { '&' });
        path.push_str(key);
        path.push('=');
        path.push_str(value);
    }
    path
}

fn parse(raw: &str) -> Result<Url, Error> {
    Ok(Url::parse(raw)?)
}
