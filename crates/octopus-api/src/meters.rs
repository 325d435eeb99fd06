// Meter point and industry endpoints

use serde_json::Value;
use tracing::debug;

use crate::client::OctopusClient;
use crate::error::Error;
use crate::types::ResourceType;

impl OctopusClient {
    /// Get details of the configured meter point.
    ///
    /// `GET /electricity-meter-points/{mpan}` or `GET /gas-meter-points/{mprn}`
    ///
    /// Electricity returns `{gsp, mpan, profile_class}`.
    pub async fn get_meter_point(&self, resource_type: ResourceType) -> Result<Value, Error> {
        let url = self.endpoints().meter_url(resource_type)?;
        debug!(%resource_type, "fetching meter point");
        self.fetch(url).await
    }

    /// List grid supply points, optionally filtered to a postcode's region.
    ///
    /// `GET /industry/grid-supply-points[?postcode=...]`
    pub async fn get_grid_supply_points(&self, postcode: Option<&str>) -> Result<Value, Error> {
        let url = self.endpoints().grid_supply_points_url(postcode)?;
        debug!(?postcode, "listing grid supply points");
        self.fetch(url).await
    }
}
