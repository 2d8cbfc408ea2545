// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// CLI subcommands and the helpers they share.

pub mod config;
pub mod convert;
pub mod edit;
pub mod history;
pub mod tools;

use std::path::Path;

use fileforge_core::error::{FileforgeError, Result};
use fileforge_core::{InputFile, format_size};
use fileforge_document::ToolReport;
use tracing::debug;

use crate::services::app_services::{AppServices, ToolRun};

/// Read a user-selected file into memory.
///
/// Files over the configured limit are refused before any bytes are read.
pub async fn read_input(services: &AppServices, path: &Path) -> Result<InputFile> {
    let name = display_name(path);
    let config = services.config();
    let size = tokio::fs::metadata(path).await?.len();
    if size > config.max_file_bytes() {
        return Err(FileforgeError::FileTooLarge {
            name,
            limit_mb: config.max_file_mb,
        });
    }

    let bytes = tokio::fs::read(path).await?;
    debug!(file = %name, size = bytes.len(), "input read");
    Ok(InputFile::new(name, bytes))
}

/// Read a plain-text file, replacing invalid UTF-8.
pub async fn read_text(services: &AppServices, path: &Path) -> Result<(String, String)> {
    let file = read_input(services, path).await?;
    let stem = file.stem().to_string();
    Ok((stem, String::from_utf8_lossy(&file.bytes).into_owned()))
}

/// Final path component, used as the input's display name.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Print what a tool run produced.
pub fn print_run(run: &ToolRun, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&run.output.report)?);
    } else {
        match &run.output.report {
            ToolReport::None => {}
            ToolReport::Compression(report) => println!("{}", report.summary()),
            ToolReport::Pages { pages } => {
                for page in pages {
                    println!("{}  {}  rotation {}°", page.caption, page.size_label, page.rotation);
                }
            }
            ToolReport::Text {
                page_count,
                found_text,
            } => {
                if *found_text {
                    println!("Extracted text from {page_count} page(s)");
                } else {
                    println!("No text found in {page_count} page(s); the PDF may be scanned");
                }
            }
        }
    }

    for (artifact, path) in run.output.artifacts.iter().zip(&run.saved) {
        println!("Saved {} ({})", path.display(), format_size(artifact.size()));
    }
    debug!(records = run.records.len(), "activity recorded");
    Ok(())
}
