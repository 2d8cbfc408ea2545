// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// FileForge — document utility suite.
//
// Entry point. Initialises logging and backend services, then dispatches the
// requested subcommand.

mod commands;
mod services;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use fileforge_core::error::Result;
use fileforge_core::human_errors::humanize_error;
use tracing_subscriber::EnvFilter;

use commands::{config, convert, edit, history, tools};
use services::app_services::AppServices;
use services::data_dir;

/// Merge, split, convert and annotate PDF documents locally
#[derive(Parser)]
#[command(name = "fileforge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Directory holding config.json and the activity history
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Directory output files are saved into
    #[arg(short, long, global = true)]
    output_dir: Option<PathBuf>,

    /// Print reports as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Combine multiple PDF files into one document
    Merge(edit::MergeArgs),

    /// Extract selected pages as separate PDF files
    Split(edit::SplitArgs),

    /// Rotate every page or individual pages
    Rotate(edit::RotateArgs),

    /// Add a text watermark to every page
    Watermark(edit::WatermarkArgs),

    /// Rewrite a PDF to reduce its size
    Compress(edit::CompressArgs),

    /// Add page numbers to every page
    PageNumbers(edit::PageNumbersArgs),

    /// Convert a plain text file to PDF
    TxtToPdf(convert::TxtToPdfArgs),

    /// Convert images to PDF, one page per image
    ImageToPdf(convert::ImageToPdfArgs),

    /// Extract the text of a PDF
    PdfToText(convert::PdfToTextArgs),

    /// Describe the pages of a PDF and extract them one per file
    PdfPages(convert::PdfPagesArgs),

    /// Show or clear the activity history
    History(history::HistoryArgs),

    /// Show or change the configuration
    Config(config::ConfigArgs),

    /// List the available tools
    Tools,
}

fn log_filter(verbose: u8) -> EnvFilter {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("FileForge starting");

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if err.is_validation() {
                tracing::debug!(error = %err, "command rejected");
            } else {
                tracing::error!(error = %err, "command failed");
            }
            let human = humanize_error(&err);
            eprintln!("Error: {}", human.message);
            eprintln!("  {}", human.suggestion);
            if human.retriable {
                eprintln!("  Running the command again may help.");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let json = cli.json;
    if let Commands::Tools = cli.command {
        return tools::run(json);
    }

    let data_dir = data_dir::data_dir(cli.data_dir.as_deref());
    let services = AppServices::init(&data_dir, cli.output_dir);

    match cli.command {
        Commands::Merge(args) => edit::merge(&services, args, json).await,
        Commands::Split(args) => edit::split(&services, args, json).await,
        Commands::Rotate(args) => edit::rotate(&services, args, json).await,
        Commands::Watermark(args) => edit::watermark(&services, args, json).await,
        Commands::Compress(args) => edit::compress(&services, args, json).await,
        Commands::PageNumbers(args) => edit::page_numbers(&services, args, json).await,
        Commands::TxtToPdf(args) => convert::txt_to_pdf(&services, args, json).await,
        Commands::ImageToPdf(args) => convert::image_to_pdf(&services, args, json).await,
        Commands::PdfToText(args) => convert::pdf_to_text(&services, args, json).await,
        Commands::PdfPages(args) => convert::pdf_pages(&services, args, json).await,
        Commands::History(args) => history::run(&services, args, json),
        Commands::Config(args) => config::run(&services, args),
        Commands::Tools => tools::run(json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn subcommand_names_match_tool_slugs() {
        let command = Cli::command();
        for kind in fileforge_core::ToolKind::ALL {
            assert!(
                command.find_subcommand(kind.slug()).is_some(),
                "missing subcommand {}",
                kind.slug()
            );
        }
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::try_parse_from([
            "fileforge", "split", "doc.pdf", "--pages", "1-3", "--output-dir", "out", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.output_dir, Some(PathBuf::from("out")));
        assert!(matches!(cli.command, Commands::Split(_)));
    }

    #[test]
    fn rotate_takes_negative_angles() {
        let cli = Cli::try_parse_from(["fileforge", "rotate", "doc.pdf", "--angle", "-90"]).unwrap();
        assert!(matches!(cli.command, Commands::Rotate(_)));
    }

    #[test]
    fn rotate_angle_and_per_page_conflict() {
        let parsed = Cli::try_parse_from([
            "fileforge", "rotate", "doc.pdf", "--angle", "180", "--per-page", "90,0",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn merge_needs_two_inputs() {
        assert!(Cli::try_parse_from(["fileforge", "merge", "one.pdf"]).is_err());
        assert!(Cli::try_parse_from(["fileforge", "merge", "one.pdf", "two.pdf"]).is_ok());
    }

    #[test]
    fn unknown_page_number_position_is_rejected() {
        assert!(Cli::try_parse_from(["fileforge", "page-numbers", "doc.pdf", "-p", "sideways"]).is_err());
        assert!(Cli::try_parse_from(["fileforge", "page-numbers", "doc.pdf", "-p", "top-right"]).is_ok());
    }

    #[test]
    fn history_has_list_and_clear() {
        assert!(Cli::try_parse_from(["fileforge", "history", "list"]).is_ok());
        assert!(Cli::try_parse_from(["fileforge", "history", "clear"]).is_ok());
        assert!(Cli::try_parse_from(["fileforge", "history"]).is_err());
    }
}
