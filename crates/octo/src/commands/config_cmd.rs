//! Config subcommand handlers. None of these touch the network.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let path = config::config_path(global);

    match args.command {
        ConfigCommand::Path => {
            output::print_output(&path.display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let mut settings = config::load_settings(global)?;
            config::apply_overrides(&mut settings, global);
            let value = serde_json::to_value(settings.redacted())?;
            super::emit(&value, global)
        }

        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }

            let mut settings = config::load_settings(global)?;
            config::apply_overrides(&mut settings, global);
            octopus_config::save_settings(&settings, &path)?;

            if !global.quiet {
                eprintln!("Wrote {}", path.display());
            }
            Ok(())
        }
    }
}
