// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `history` subcommand — show or clear the activity history.

use clap::{Args, Subcommand};
use fileforge_core::error::Result;

use crate::services::app_services::AppServices;

/// Arguments for the history command.
#[derive(Args)]
pub struct HistoryArgs {
    #[command(subcommand)]
    command: HistoryCommand,
}

#[derive(Subcommand)]
enum HistoryCommand {
    /// List recent activity, newest first
    List,
    /// Delete all recorded activity
    Clear,
}

pub fn run(services: &AppServices, args: HistoryArgs, json: bool) -> Result<()> {
    match args.command {
        HistoryCommand::List => list(services, json),
        HistoryCommand::Clear => {
            services.clear_history();
            println!("Activity history cleared");
            Ok(())
        }
    }
}

fn list(services: &AppServices, json: bool) -> Result<()> {
    let records = services.history();
    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No activity yet");
        if !services.history_is_persistent() {
            println!("(history is not being kept on this system)");
        }
        return Ok(());
    }
    for record in &records {
        println!("{}", record.display_line());
    }
    Ok(())
}
