// Consumption endpoints
//
// Half-hourly meter readings, optionally aggregated server-side. Up to
// 25,000 results per page, a full year of half-hourly data.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use tracing::debug;

use crate::client::OctopusClient;
use crate::error::Error;
use crate::time::{Period, date_to_periods};
use crate::types::ResourceType;
use crate::urls::ConsumptionOptions;

impl OctopusClient {
    /// Consumption for the configured meter between two instants.
    ///
    /// `GET {meter}/meters/{serial}/consumption?period_from=..&period_to=..`
    pub async fn get_consumption_for_period(
        &self,
        resource_type: ResourceType,
        period_from: DateTime<Utc>,
        period_to: DateTime<Utc>,
        options: &ConsumptionOptions,
    ) -> Result<Value, Error> {
        let period = Period::new(period_from, period_to);
        let url = self
            .endpoints()
            .consumption_data_url(resource_type, &period, options)?;
        debug!(
            %resource_type,
            from = %period.from,
            to = %period.to,
            group_by = %options.group_by,
            "fetching consumption"
        );
        self.fetch(url).await
    }

    /// Consumption for every settlement period of a calendar day (UTC).
    pub async fn get_consumption_for_date(
        &self,
        resource_type: ResourceType,
        date: NaiveDate,
        options: &ConsumptionOptions,
    ) -> Result<Value, Error> {
        let period = date_to_periods(date);
        self.get_consumption_for_period(resource_type, period.from, period.to, options)
            .await
    }
}
