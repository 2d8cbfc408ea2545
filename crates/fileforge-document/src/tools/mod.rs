// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tool pipelines — one function per tool, each turning in-memory input files
// and typed options into output artifacts.
//
// A pipeline either returns every artifact it was asked for or fails; no
// partial output is ever handed back.

pub mod compress;
pub mod convert;
pub mod merge;
pub mod page_numbers;
pub mod rotate;
pub mod split;
pub mod watermark;

use fileforge_core::error::{FileforgeError, Result};
use fileforge_core::{
    Artifact, DocumentType, InputFile, Orientation, PageNumberOptions, PaperSize, RotationPlan,
    ToolKind, WatermarkOptions,
};
use serde::Serialize;
use tracing::{info, instrument};

use crate::pdf::PdfDocument;

pub use compress::CompressionReport;
pub use convert::PageDescriptor;

/// One invocation of a tool with its inputs and options.
#[derive(Debug, Clone)]
pub enum ToolRequest {
    Merge {
        files: Vec<InputFile>,
        /// Output name without extension.
        output_name: String,
    },
    Split {
        file: InputFile,
        /// Page selection such as `1-3, 5`.
        pages: String,
    },
    Rotate {
        file: InputFile,
        plan: RotationPlan,
    },
    Watermark {
        file: InputFile,
        options: WatermarkOptions,
    },
    Compress {
        file: InputFile,
    },
    PageNumbers {
        file: InputFile,
        options: PageNumberOptions,
    },
    TxtToPdf {
        text: String,
        output_name: String,
        paper_size: PaperSize,
    },
    ImageToPdf {
        files: Vec<InputFile>,
        orientation: Orientation,
        output_name: String,
        paper_size: PaperSize,
    },
    PdfToText {
        file: InputFile,
    },
    PdfPages {
        file: InputFile,
        /// Pages to extract; every page when `None`.
        pages: Option<String>,
    },
}

impl ToolRequest {
    pub fn kind(&self) -> ToolKind {
        match self {
            Self::Merge { .. } => ToolKind::Merge,
            Self::Split { .. } => ToolKind::Split,
            Self::Rotate { .. } => ToolKind::Rotate,
            Self::Watermark { .. } => ToolKind::Watermark,
            Self::Compress { .. } => ToolKind::Compress,
            Self::PageNumbers { .. } => ToolKind::PageNumbers,
            Self::TxtToPdf { .. } => ToolKind::TxtToPdf,
            Self::ImageToPdf { .. } => ToolKind::ImageToPdf,
            Self::PdfToText { .. } => ToolKind::PdfToText,
            Self::PdfPages { .. } => ToolKind::PdfToImage,
        }
    }

    /// Every input file carried by the request.
    pub fn inputs(&self) -> Vec<&InputFile> {
        match self {
            Self::Merge { files, .. } | Self::ImageToPdf { files, .. } => files.iter().collect(),
            Self::Split { file, .. }
            | Self::Rotate { file, .. }
            | Self::Watermark { file, .. }
            | Self::Compress { file }
            | Self::PageNumbers { file, .. }
            | Self::PdfToText { file }
            | Self::PdfPages { file, .. } => vec![file],
            Self::TxtToPdf { .. } => Vec::new(),
        }
    }
}

/// Extra information a tool reports besides its artifacts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ToolReport {
    None,
    Compression(CompressionReport),
    Pages { pages: Vec<PageDescriptor> },
    Text { page_count: usize, found_text: bool },
}

/// Everything a successful tool run produced.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub kind: ToolKind,
    pub artifacts: Vec<Artifact>,
    pub report: ToolReport,
}

impl ToolOutput {
    fn new(kind: ToolKind, artifacts: Vec<Artifact>) -> Self {
        Self {
            kind,
            artifacts,
            report: ToolReport::None,
        }
    }

    fn with_report(mut self, report: ToolReport) -> Self {
        self.report = report;
        self
    }
}

/// Run the tool described by `request`.
#[instrument(skip_all, fields(tool = %request.kind()))]
pub fn run(request: &ToolRequest) -> Result<ToolOutput> {
    let kind = request.kind();
    let output = match request {
        ToolRequest::Merge { files, output_name } => {
            ToolOutput::new(kind, vec![merge::merge(files, output_name)?])
        }
        ToolRequest::Split { file, pages } => ToolOutput::new(kind, split::split(file, pages)?),
        ToolRequest::Rotate { file, plan } => ToolOutput::new(kind, vec![rotate::rotate(file, plan)?]),
        ToolRequest::Watermark { file, options } => {
            ToolOutput::new(kind, vec![watermark::watermark(file, options)?])
        }
        ToolRequest::Compress { file } => {
            let (artifact, report) = compress::compress(file)?;
            ToolOutput::new(kind, vec![artifact]).with_report(ToolReport::Compression(report))
        }
        ToolRequest::PageNumbers { file, options } => {
            ToolOutput::new(kind, vec![page_numbers::add_page_numbers(file, options)?])
        }
        ToolRequest::TxtToPdf {
            text,
            output_name,
            paper_size,
        } => ToolOutput::new(kind, vec![convert::txt_to_pdf(text, output_name, *paper_size)?]),
        ToolRequest::ImageToPdf {
            files,
            orientation,
            output_name,
            paper_size,
        } => ToolOutput::new(
            kind,
            vec![convert::image_to_pdf(files, *orientation, output_name, *paper_size)?],
        ),
        ToolRequest::PdfToText { file } => {
            let extraction = convert::pdf_to_text(file)?;
            ToolOutput::new(kind, vec![extraction.artifact]).with_report(ToolReport::Text {
                page_count: extraction.page_count,
                found_text: extraction.found_text,
            })
        }
        ToolRequest::PdfPages { file, pages } => {
            let (descriptors, artifacts) = convert::pdf_pages(file, pages.as_deref())?;
            ToolOutput::new(kind, artifacts).with_report(ToolReport::Pages { pages: descriptors })
        }
    };

    info!(artifacts = output.artifacts.len(), "Tool finished");
    Ok(output)
}

// -- Shared helpers -----------------------------------------------------------

/// Load `file` as a PDF, refusing files that are clearly something else.
pub(crate) fn load_pdf(file: &InputFile) -> Result<PdfDocument> {
    if let Some(doc_type) = file.document_type()
        && doc_type != DocumentType::Pdf
    {
        return Err(FileforgeError::UnsupportedDocument(format!(
            "{} ({})",
            file.name,
            doc_type.mime_type()
        )));
    }

    let document = PdfDocument::from_bytes(&file.bytes)?;
    if document.page_count() == 0 {
        return Err(FileforgeError::InvalidInput(format!("\"{}\" has no pages", file.name)));
    }
    Ok(document)
}

/// `name` with `.{extension}` appended; blank names fall back to `default`.
pub(crate) fn output_name(name: &str, default: &str, extension: &str) -> String {
    let name = name.trim();
    let stem = if name.is_empty() { default } else { name };
    format!("{stem}.{extension}")
}
