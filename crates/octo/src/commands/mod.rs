//! Command dispatch: bridges CLI args -> client calls -> output formatting.

pub mod config_cmd;
pub mod consumption;
pub mod gsp;
pub mod meter;
pub mod next;
pub mod tariff;

use chrono::{DateTime, Utc};
use octopus_api::{OctopusClient, PageSpec};
use serde_json::Value;

use crate::cli::{ApiCommand, GlobalOpts, PageOpts};
use crate::error::CliError;
use crate::output;

/// Dispatch an API-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: ApiCommand,
    client: &OctopusClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        ApiCommand::Meter(args) => meter::handle(client, &args, global).await,
        ApiCommand::Gsp(args) => gsp::handle(client, args, global).await,
        ApiCommand::Tariff(args) => tariff::handle(client, &args, global).await,
        ApiCommand::Consumption(args) => consumption::handle(client, &args, global).await,
        ApiCommand::Next(args) => next::handle(client, &args, global).await,
    }
}

// ── Shared helpers ───────────────────────────────────────────────────

/// Render and print one response.
pub(crate) fn emit(value: &Value, global: &GlobalOpts) -> Result<(), CliError> {
    let rendered = output::render(global.output, value)?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}

pub(crate) fn page_spec(paging: &PageOpts) -> PageSpec {
    let spec = PageSpec::with_size(paging.page_size);
    match paging.page {
        Some(page) => spec.page(page),
        None => spec,
    }
}

/// Reject a period whose start is after its end.
pub(crate) fn check_period(
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Result<(), CliError> {
    match (from, to) {
        (Some(from), Some(to)) if from > to => Err(CliError::Validation {
            field: "--from".into(),
            reason: format!("{from} is after --to {to}"),
        }),
        _ => Ok(()),
    }
}

/// Print a listing, or with `--all` every result reachable from it.
pub(crate) async fn emit_listing(
    client: &OctopusClient,
    first: Value,
    paging: &PageOpts,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if paging.all {
        let results = client.collect_results(first).await?;
        tracing::debug!(count = results.len(), "collected all pages");
        emit(&Value::Array(results), global)
    } else {
        emit(&first, global)
    }
}
