//! Consumption handler.

use octopus_api::{ConsumptionOptions, OctopusClient};
use tracing::info;

use crate::cli::{ConsumptionArgs, GlobalOpts};
use crate::error::CliError;

pub async fn handle(
    client: &OctopusClient,
    args: &ConsumptionArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let options = ConsumptionOptions::default()
        .reversed(args.reverse)
        .page(super::page_spec(&args.paging))
        .group_by(args.group_by);

    info!(
        resource = %args.resource,
        unit = args.resource.consumption_unit(),
        "fetching consumption"
    );

    let consumption = match (args.date, args.from, args.to) {
        (Some(date), _, _) => {
            client
                .get_consumption_for_date(args.resource, date, &options)
                .await?
        }
        (None, Some(from), Some(to)) => {
            super::check_period(Some(from), Some(to))?;
            client
                .get_consumption_for_period(args.resource, from, to, &options)
                .await?
        }
        _ => {
            return Err(CliError::Validation {
                field: "period".into(),
                reason: "pass --date, or both --from and --to".into(),
            });
        }
    };

    super::emit_listing(client, consumption, &args.paging, global).await
}
