//! Tariff charge handler.

use octopus_api::{OctopusClient, TariffQuery};

use crate::cli::{GlobalOpts, TariffArgs};
use crate::error::CliError;

pub async fn handle(
    client: &OctopusClient,
    args: &TariffArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    super::check_period(args.from, args.to)?;

    let mut query = TariffQuery::new(args.charge).page(super::page_spec(&args.paging));
    if let Some(from) = args.from {
        query = query.period_from(from);
    }
    if let Some(to) = args.to {
        query = query.period_to(to);
    }

    let charges = client.get_tariff_data(args.resource, &query).await?;
    super::emit_listing(client, charges, &args.paging, global).await
}
