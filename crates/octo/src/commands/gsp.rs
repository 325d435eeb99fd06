//! Grid supply point handler.

use octopus_api::OctopusClient;

use crate::cli::{GlobalOpts, GspArgs};
use crate::error::CliError;

pub async fn handle(
    client: &OctopusClient,
    args: GspArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let postcode = args.postcode.filter(|p| !p.trim().is_empty());
    let gsps = client.get_grid_supply_points(postcode.as_deref()).await?;
    super::emit(&gsps, global)
}
