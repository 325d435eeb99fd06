//! `next` link handler.

use octopus_api::OctopusClient;

use crate::cli::{GlobalOpts, NextArgs};
use crate::error::CliError;

pub async fn handle(
    client: &OctopusClient,
    args: &NextArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let page = client.fetch_str(&args.url).await?;
    super::emit(&page, global)
}
