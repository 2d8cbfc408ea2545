// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF editing subcommands: merge, split, rotate, watermark, compress and
// page numbers.

use std::path::PathBuf;

use clap::Args;
use fileforge_core::error::Result;
use fileforge_core::{
    Anchor, PageNumberFormat, PageNumberOptions, RotationPlan, WatermarkColor, WatermarkOptions,
};
use fileforge_document::ToolRequest;

use super::{print_run, read_input};
use crate::services::app_services::AppServices;

/// Arguments for `merge`.
#[derive(Args)]
pub struct MergeArgs {
    /// PDF files, in the order they should appear
    #[arg(required = true, num_args = 2..)]
    inputs: Vec<PathBuf>,

    /// Output name without extension
    #[arg(short, long, default_value = "merged")]
    name: String,
}

/// Arguments for `split`.
#[derive(Args)]
pub struct SplitArgs {
    input: PathBuf,

    /// Pages to extract, e.g. "1-3, 5"
    #[arg(short, long)]
    pages: String,
}

/// Arguments for `rotate`.
#[derive(Args)]
pub struct RotateArgs {
    input: PathBuf,

    /// Rotate every page by this many degrees (multiple of 90)
    #[arg(short, long, allow_negative_numbers = true, default_value_t = 90, conflicts_with = "per_page")]
    angle: i32,

    /// Comma-separated angle per page, e.g. "90,0,180"
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    per_page: Vec<i32>,
}

impl RotateArgs {
    fn plan(&self) -> RotationPlan {
        if self.per_page.is_empty() {
            RotationPlan::All(self.angle)
        } else {
            RotationPlan::PerPage(self.per_page.clone())
        }
    }
}

/// Arguments for `watermark`.
#[derive(Args)]
pub struct WatermarkArgs {
    input: PathBuf,

    /// Watermark text
    #[arg(short, long, default_value = "CONFIDENTIAL")]
    text: String,

    /// Font size in points
    #[arg(long, default_value_t = 48.0)]
    font_size: f32,

    /// Opacity between 0 and 1
    #[arg(long, default_value_t = 0.15)]
    opacity: f32,

    /// gray, red or blue
    #[arg(long, default_value = "gray")]
    color: WatermarkColor,

    /// Counter-clockwise rotation in degrees
    #[arg(long, allow_negative_numbers = true, default_value_t = 45.0)]
    rotation: f32,
}

impl WatermarkArgs {
    fn options(&self) -> WatermarkOptions {
        WatermarkOptions {
            text: self.text.clone(),
            font_size: self.font_size,
            opacity: self.opacity,
            color: self.color,
            rotation_deg: self.rotation,
        }
    }
}

/// Arguments for `compress`.
#[derive(Args)]
pub struct CompressArgs {
    input: PathBuf,
}

/// Arguments for `page-numbers`.
#[derive(Args)]
pub struct PageNumbersArgs {
    input: PathBuf,

    /// top-left, top-center, top-right, bottom-left, bottom-center or bottom-right
    #[arg(short, long, default_value = "bottom-center")]
    position: Anchor,

    /// Number printed on the first page
    #[arg(long, allow_negative_numbers = true, default_value_t = 1)]
    start: i64,

    /// Font size in points
    #[arg(long, default_value_t = 12.0)]
    font_size: f32,

    /// plain ("7"), dash ("- 7 -") or of ("7 of 12")
    #[arg(short, long, default_value = "plain")]
    format: PageNumberFormat,

    /// Distance from the page edge in points
    #[arg(long, default_value_t = 36.0)]
    margin: f32,
}

impl PageNumbersArgs {
    fn options(&self) -> PageNumberOptions {
        PageNumberOptions {
            position: self.position,
            start_number: self.start,
            font_size: self.font_size,
            format: self.format,
            margin: self.margin,
        }
    }
}

pub async fn merge(services: &AppServices, args: MergeArgs, json: bool) -> Result<()> {
    let mut files = Vec::with_capacity(args.inputs.len());
    for path in &args.inputs {
        files.push(read_input(services, path).await?);
    }
    let run = services
        .run_tool(ToolRequest::Merge {
            files,
            output_name: args.name,
        })
        .await?;
    print_run(&run, json)
}

pub async fn split(services: &AppServices, args: SplitArgs, json: bool) -> Result<()> {
    let file = read_input(services, &args.input).await?;
    let run = services
        .run_tool(ToolRequest::Split {
            file,
            pages: args.pages,
        })
        .await?;
    print_run(&run, json)
}

pub async fn rotate(services: &AppServices, args: RotateArgs, json: bool) -> Result<()> {
    let plan = args.plan();
    let file = read_input(services, &args.input).await?;
    let run = services.run_tool(ToolRequest::Rotate { file, plan }).await?;
    print_run(&run, json)
}

pub async fn watermark(services: &AppServices, args: WatermarkArgs, json: bool) -> Result<()> {
    let options = args.options();
    let file = read_input(services, &args.input).await?;
    let run = services.run_tool(ToolRequest::Watermark { file, options }).await?;
    print_run(&run, json)
}

pub async fn compress(services: &AppServices, args: CompressArgs, json: bool) -> Result<()> {
    let file = read_input(services, &args.input).await?;
    let run = services.run_tool(ToolRequest::Compress { file }).await?;
    print_run(&run, json)
}

pub async fn page_numbers(services: &AppServices, args: PageNumbersArgs, json: bool) -> Result<()> {
    let options = args.options();
    let file = read_input(services, &args.input).await?;
    let run = services.run_tool(ToolRequest::PageNumbers { file, options }).await?;
    print_run(&run, json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_angle_applies_to_every_page() {
        let args = RotateArgs {
            input: "doc.pdf".into(),
            angle: 180,
            per_page: Vec::new(),
        };
        assert_eq!(args.plan(), RotationPlan::All(180));
    }

    #[test]
    fn per_page_angles_win() {
        let args = RotateArgs {
            input: "doc.pdf".into(),
            angle: 90,
            per_page: vec![90, 0, -90],
        };
        assert_eq!(args.plan(), RotationPlan::PerPage(vec![90, 0, -90]));
    }
}
