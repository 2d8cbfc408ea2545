// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Conversion subcommands: text and images to PDF, PDF to text and pages.

use std::path::PathBuf;

use clap::Args;
use fileforge_core::error::Result;
use fileforge_core::{Orientation, PaperSize};
use fileforge_document::ToolRequest;

use super::{print_run, read_input, read_text};
use crate::services::app_services::AppServices;

/// Arguments for `txt-to-pdf`.
#[derive(Args)]
pub struct TxtToPdfArgs {
    input: PathBuf,

    /// Output name without extension (defaults to the input name)
    #[arg(short, long)]
    name: Option<String>,

    /// a4, a3, a5, letter or legal (defaults to the configured size)
    #[arg(long)]
    paper: Option<PaperSize>,
}

/// Arguments for `image-to-pdf`.
#[derive(Args)]
pub struct ImageToPdfArgs {
    /// JPEG, PNG or WebP images, one page each
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// portrait or landscape
    #[arg(long, default_value = "portrait")]
    orientation: Orientation,

    /// Output name without extension
    #[arg(short, long, default_value = "images")]
    name: String,

    /// a4, a3, a5, letter or legal (defaults to the configured size)
    #[arg(long)]
    paper: Option<PaperSize>,
}

/// Arguments for `pdf-to-text`.
#[derive(Args)]
pub struct PdfToTextArgs {
    input: PathBuf,
}

/// Arguments for `pdf-pages`.
#[derive(Args)]
pub struct PdfPagesArgs {
    input: PathBuf,

    /// Pages to extract, e.g. "1-3, 5" (every page when omitted)
    #[arg(short, long)]
    pages: Option<String>,
}

pub async fn txt_to_pdf(services: &AppServices, args: TxtToPdfArgs, json: bool) -> Result<()> {
    let (stem, text) = read_text(services, &args.input).await?;
    let run = services
        .run_tool(ToolRequest::TxtToPdf {
            text,
            output_name: args.name.unwrap_or(stem),
            paper_size: args.paper.unwrap_or(services.config().paper_size),
        })
        .await?;
    print_run(&run, json)
}

pub async fn image_to_pdf(services: &AppServices, args: ImageToPdfArgs, json: bool) -> Result<()> {
    let mut files = Vec::with_capacity(args.inputs.len());
    for path in &args.inputs {
        files.push(read_input(services, path).await?);
    }
    let run = services
        .run_tool(ToolRequest::ImageToPdf {
            files,
            orientation: args.orientation,
            output_name: args.name,
            paper_size: args.paper.unwrap_or(services.config().paper_size),
        })
        .await?;
    print_run(&run, json)
}

pub async fn pdf_to_text(services: &AppServices, args: PdfToTextArgs, json: bool) -> Result<()> {
    let file = read_input(services, &args.input).await?;
    let run = services.run_tool(ToolRequest::PdfToText { file }).await?;
    print_run(&run, json)
}

pub async fn pdf_pages(services: &AppServices, args: PdfPagesArgs, json: bool) -> Result<()> {
    let file = read_input(services, &args.input).await?;
    let run = services
        .run_tool(ToolRequest::PdfPages {
            file,
            pages: args.pages,
        })
        .await?;
    print_run(&run, json)
}
