//! Meter point handler.

use octopus_api::OctopusClient;

use crate::cli::{GlobalOpts, MeterArgs};
use crate::error::CliError;

pub async fn handle(
    client: &OctopusClient,
    args: &MeterArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let meter = client.get_meter_point(args.resource).await?;
    super::emit(&meter, global)
}
