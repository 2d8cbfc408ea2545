// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Conversions — text to PDF, images to PDF, PDF to text, and PDF to
// individual pages with a short description of each.

use fileforge_core::error::{FileforgeError, Result};
use fileforge_core::{Artifact, InputFile, Orientation, PaperSize};
use serde::Serialize;
use tracing::{debug, instrument};

use super::{load_pdf, output_name, split};
use crate::image::ImageProcessor;
use crate::layout::{SelectionSet, resolve_selection};
use crate::pdf::PdfWriter;

/// Written instead of the extracted text when a PDF has none.
pub const NO_TEXT_NOTICE: &str =
    "No extractable text found. This PDF may contain scanned images or use unsupported encoding.";

// -- Text to PDF --------------------------------------------------------------

/// Lay `text` out on `paper_size` pages as `{name}.pdf` (default `output.pdf`).
#[instrument(skip(text), fields(text_len = text.len()))]
pub fn txt_to_pdf(text: &str, name: &str, paper_size: PaperSize) -> Result<Artifact> {
    if text.trim().is_empty() {
        return Err(FileforgeError::InvalidInput("there is no text to convert".into()));
    }

    let mut writer = PdfWriter::new(paper_size);
    writer.set_title(name.trim());
    let bytes = writer.create_from_text(text)?;
    Ok(Artifact::new(output_name(name, "output", "pdf"), bytes))
}

// -- Images to PDF ------------------------------------------------------------

/// One page per image, in the order given, as `{name}.pdf` (default
/// `images.pdf`).
#[instrument(skip(files), fields(files = files.len()))]
pub fn image_to_pdf(
    files: &[InputFile],
    orientation: Orientation,
    name: &str,
    paper_size: PaperSize,
) -> Result<Artifact> {
    if files.is_empty() {
        return Err(FileforgeError::InvalidInput("select at least one image".into()));
    }

    let images = files
        .iter()
        .map(|file| -> Result<ImageProcessor> {
            if let Some(doc_type) = file.document_type()
                && !doc_type.is_image()
            {
                return Err(FileforgeError::UnsupportedDocument(format!(
                    "{} ({})",
                    file.name,
                    doc_type.mime_type()
                )));
            }
            ImageProcessor::from_bytes(&file.bytes)
        })
        .collect::<Result<Vec<_>>>()?;

    let bytes = PdfWriter::new(paper_size).create_from_images(&images, orientation)?;
    Ok(Artifact::new(output_name(name, "images", "pdf"), bytes))
}

// -- PDF to text --------------------------------------------------------------

/// Result of extracting text from a PDF.
#[derive(Debug, Clone)]
pub struct TextExtraction {
    /// `{base}.txt` holding the text, or the notice when there was none.
    pub artifact: Artifact,
    pub page_count: usize,
    pub found_text: bool,
}

/// Extract the text of every page into `{base}.txt`.
#[instrument(skip(file), fields(file = %file.name))]
pub fn pdf_to_text(file: &InputFile) -> Result<TextExtraction> {
    let document = load_pdf(file)?;
    let text = document.extract_text();
    let text = text.trim();
    let found_text = !text.is_empty();
    let content = if found_text { text } else { NO_TEXT_NOTICE };

    debug!(pages = document.page_count(), chars = text.len(), found_text, "Text extracted");
    Ok(TextExtraction {
        artifact: Artifact::new(
            format!("{}.txt", file.pdf_base_name()),
            content.as_bytes().to_vec(),
        ),
        page_count: document.page_count(),
        found_text,
    })
}

// -- PDF to pages -------------------------------------------------------------

/// What the page overview shows for one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageDescriptor {
    /// One-based page number.
    pub number: usize,
    /// Width and height in points.
    pub width: f32,
    pub height: f32,
    pub rotation: i32,
    /// e.g. `Page 2 of 5`.
    pub caption: String,
    /// e.g. `612 x 792 pt`.
    pub size_label: String,
}

/// Describe every page and extract the selected ones (all when `pages` is
/// `None`) as `{base}_page_{n}.pdf`.
#[instrument(skip(file), fields(file = %file.name))]
pub fn pdf_pages(file: &InputFile, pages: Option<&str>) -> Result<(Vec<PageDescriptor>, Vec<Artifact>)> {
    let document = load_pdf(file)?;
    let total = document.page_count();

    let descriptors = (0..total)
        .map(|index| -> Result<PageDescriptor> {
            let (width, height) = document.page_size(index)?;
            Ok(PageDescriptor {
                number: index + 1,
                width,
                height,
                rotation: document.rotation(index)?,
                caption: format!("Page {} of {}", index + 1, total),
                size_label: format!("{} x {} pt", width.round(), height.round()),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let selection = match pages {
        Some(expression) => resolve_selection(expression, total),
        None => SelectionSet::all(total),
    };
    if selection.is_empty() {
        return Err(FileforgeError::EmptySelection);
    }

    let artifacts = split::single_pages(&document, file.pdf_base_name(), selection.iter())?;
    Ok((descriptors, artifacts))
}
