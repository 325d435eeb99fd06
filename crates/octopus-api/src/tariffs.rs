// Tariff charge endpoints

use serde_json::Value;
use tracing::debug;

use crate::client::OctopusClient;
use crate::error::Error;
use crate::types::ResourceType;
use crate::urls::TariffQuery;

impl OctopusClient {
    /// List charges of one type for the configured tariff.
    ///
    /// `GET /products/{code}/{kind}-tariffs/E-1R-{code}-{region}/{charge}`
    ///
    /// Paginated. The API allows up to 1,500 results per page, enough for a
    /// month of half-hourly prices.
    pub async fn get_tariff_data(
        &self,
        resource_type: ResourceType,
        query: &TariffQuery,
    ) -> Result<Value, Error> {
        let url = self.endpoints().tariff_data_url(resource_type, query)?;
        debug!(
            %resource_type,
            charge_type = %query.charge_type,
            page_size = query.page.page_size.get(),
            "fetching tariff data"
        );
        self.fetch(url).await
    }
}
