//! Clap derive structures for the `octo` CLI.
//!
//! Defines the command tree, global flags, and shared value types.

use std::num::NonZeroU32;
use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use octopus_api::{Aggregate, ChargeType, ResourceType};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// octo -- query Octopus Energy meter points, tariffs, and consumption
#[derive(Debug, Parser)]
#[command(
    name = "octo",
    version,
    about = "Query Octopus Energy meters, tariffs, and consumption",
    long_about = "Query the Octopus Energy REST API for meter point details, grid supply\n\
        points, tariff charges, and smart meter consumption.\n\n\
        Credentials and meter identifiers come from flags, OCTOPUS_* environment\n\
        variables, or the config file (see `octo config path`).",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file to read instead of the platform default
    #[arg(long, env = "OCTOPUS_CONFIG", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "OCTOPUS_OUTPUT",
        default_value = "json",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds (0 disables it) [default: 30]
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// API root to send requests to
    #[arg(long, global = true, hide = true)]
    pub base_url: Option<String>,

    #[command(flatten)]
    pub account: AccountOpts,
}

/// Identity overrides. Each one wins over the environment and config file.
#[derive(Debug, Default, Args)]
#[command(next_help_heading = "Account")]
pub struct AccountOpts {
    /// API key from the Octopus developer dashboard
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Electricity meter serial number
    #[arg(long, global = true)]
    pub electricity_serial: Option<String>,

    /// Electricity meter point administration number
    #[arg(long, global = true)]
    pub electricity_mpan: Option<String>,

    /// Electricity product code (e.g. AGILE-18-02-21)
    #[arg(long, global = true)]
    pub electricity_product_code: Option<String>,

    /// Electricity region letter (e.g. C)
    #[arg(long, global = true)]
    pub electricity_region: Option<String>,

    /// Gas meter serial number
    #[arg(long, global = true)]
    pub gas_serial: Option<String>,

    /// Gas meter point reference number
    #[arg(long, global = true)]
    pub gas_mprn: Option<String>,

    /// Gas product code
    #[arg(long, global = true)]
    pub gas_product_code: Option<String>,

    /// Gas region letter
    #[arg(long, global = true)]
    pub gas_region: Option<String>,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON (default)
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Table of the `results` rows
    Table,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(flatten)]
    Api(ApiCommand),

    /// Inspect or create the config file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Commands that need a configured client.
#[derive(Debug, Subcommand)]
pub enum ApiCommand {
    /// Show meter point details for a supply
    #[command(alias = "m")]
    Meter(MeterArgs),

    /// List grid supply points, optionally for a postcode
    Gsp(GspArgs),

    /// List tariff charges for the configured product and region
    #[command(alias = "t")]
    Tariff(TariffArgs),

    /// Fetch smart meter consumption
    #[command(alias = "c")]
    Consumption(ConsumptionArgs),

    /// Fetch a `next` link from a previous listing
    Next(NextArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DATA COMMANDS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct MeterArgs {
    /// Supply: electricity or gas
    pub resource: ResourceType,
}

#[derive(Debug, Args)]
pub struct GspArgs {
    /// UK postcode to look up (e.g. "SW1A 1AA")
    #[arg(long)]
    pub postcode: Option<String>,
}

/// Paging flags shared by list commands.
#[derive(Debug, Args)]
pub struct PageOpts {
    /// Results per page
    #[arg(long, default_value = "100")]
    pub page_size: NonZeroU32,

    /// Page number to request (first page when omitted)
    #[arg(long, conflicts_with = "all")]
    pub page: Option<NonZeroU32>,

    /// Follow `next` links and print every result
    #[arg(long)]
    pub all: bool,
}

#[derive(Debug, Args)]
pub struct TariffArgs {
    /// Supply: electricity or gas
    pub resource: ResourceType,

    /// Charge: standing-charges, standard-unit-rates, day-unit-rates, night-unit-rates
    pub charge: ChargeType,

    /// Start of the period (RFC 3339, e.g. 2024-01-01T00:00:00Z)
    #[arg(long)]
    pub from: Option<DateTime<Utc>>,

    /// End of the period (RFC 3339)
    #[arg(long)]
    pub to: Option<DateTime<Utc>>,

    #[command(flatten)]
    pub paging: PageOpts,
}

#[derive(Debug, Args)]
pub struct ConsumptionArgs {
    /// Supply: electricity or gas
    pub resource: ResourceType,

    /// Calendar day (YYYY-MM-DD); covers all 48 settlement periods
    #[arg(
        long,
        conflicts_with_all = ["from", "to"],
        required_unless_present_all = ["from", "to"]
    )]
    pub date: Option<NaiveDate>,

    /// Start of the period (RFC 3339)
    #[arg(long, requires = "to")]
    pub from: Option<DateTime<Utc>>,

    /// End of the period (RFC 3339)
    #[arg(long, requires = "from")]
    pub to: Option<DateTime<Utc>>,

    /// Newest readings first
    #[arg(long)]
    pub reverse: bool,

    /// Aggregation: half-hour, hour, day, week, month, quarter
    #[arg(long, default_value = "half-hour")]
    pub group_by: Aggregate,

    #[command(flatten)]
    pub paging: PageOpts,
}

#[derive(Debug, Args)]
pub struct NextArgs {
    /// Absolute URL taken from a listing's `next` field
    pub url: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Display the resolved settings (API key masked)
    Show,

    /// Write a config file from the account flags and environment
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
