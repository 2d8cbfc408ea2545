// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `config` subcommand — show and change the persisted settings.

use clap::{Args, Subcommand};
use fileforge_core::AppConfig;
use fileforge_core::error::{FileforgeError, Result};
use tracing::info;

use crate::services::app_services::AppServices;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show the current configuration
    Show,

    /// Set a configuration value
    Set {
        /// max_file_mb, history_backend, output_dir or paper_size
        key: String,
        /// New value; an empty output_dir resets it
        value: String,
    },

    /// Show the data directory path
    Path,
}

pub fn run(services: &AppServices, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommand::Show => {
            println!("{}", serde_json::to_string_pretty(&services.config())?);
        }
        ConfigCommand::Set { key, value } => {
            let mut config = services.config();
            apply_setting(&mut config, &key, &value)?;
            services.save_config(&config)?;
            info!(key = %key, "configuration updated");
            println!("Set {key} = {value}");
        }
        ConfigCommand::Path => println!("{}", services.data_dir().display()),
    }
    Ok(())
}

fn apply_setting(config: &mut AppConfig, key: &str, value: &str) -> Result<()> {
    match key {
        "max_file_mb" => {
            config.max_file_mb = value.trim().parse().map_err(|_| {
                FileforgeError::InvalidOption(format!("max_file_mb must be a whole number, got '{value}'"))
            })?;
        }
        "history_backend" => config.history_backend = value.parse()?,
        "output_dir" => {
            config.output_dir = (!value.trim().is_empty()).then(|| value.trim().into());
        }
        "paper_size" => config.paper_size = value.parse()?,
        other => {
            return Err(FileforgeError::InvalidOption(format!("unknown setting '{other}'")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fileforge_core::PaperSize;
    use fileforge_core::config::HistoryBackend;

    #[test]
    fn settings_are_parsed_into_config() {
        let mut config = AppConfig::default();
        apply_setting(&mut config, "max_file_mb", "10").unwrap();
        apply_setting(&mut config, "history_backend", "memory").unwrap();
        apply_setting(&mut config, "paper_size", "letter").unwrap();
        apply_setting(&mut config, "output_dir", "/tmp/out").unwrap();

        assert_eq!(config.max_file_mb, 10);
        assert_eq!(config.history_backend, HistoryBackend::Memory);
        assert_eq!(config.paper_size, PaperSize::Letter);
        assert_eq!(config.output_dir, Some("/tmp/out".into()));

        apply_setting(&mut config, "output_dir", "").unwrap();
        assert_eq!(config.output_dir, None);
    }

    #[test]
    fn bad_values_are_invalid_options() {
        let mut config = AppConfig::default();
        assert!(matches!(
            apply_setting(&mut config, "max_file_mb", "lots"),
            Err(FileforgeError::InvalidOption(_))
        ));
        assert!(apply_setting(&mut config, "colour", "red").is_err());
        assert_eq!(config, AppConfig::default());
    }
}
