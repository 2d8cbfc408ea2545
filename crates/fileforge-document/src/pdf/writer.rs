// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer — create new PDF documents from text or images using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`. Layout decisions come from the `layout` module.

use fileforge_core::error::{FileforgeError, Result};
use fileforge_core::{Orientation, PaperSize};
use printpdf::{
    BuiltinFont, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Pt, RawImage,
    RawImageData, RawImageFormat, TextItem, XObjectTransform,
};
use tracing::{debug, info, instrument, warn};

use crate::image::ImageProcessor;
use crate::layout::{self, StandardFont};

/// Text layout, in millimetres unless noted.
const TEXT_FONT_SIZE_PT: f32 = 16.0;
const TEXT_LEFT_MARGIN: f32 = 15.0;
const TEXT_LINE_WIDTH: f32 = 180.0;
const TEXT_VERTICAL_MARGIN: f32 = 20.0;
const TEXT_LINE_HEIGHT: f32 = 7.0;

/// Blank border around each image page, in millimetres.
const IMAGE_MARGIN: f32 = 10.0;

const MM_PER_PT: f32 = 25.4 / 72.0;

/// Creates new PDF documents from text content or raster images.
pub struct PdfWriter {
    /// Paper size for page creation.
    paper_size: PaperSize,
    /// Title metadata embedded in the PDF /Info dictionary.
    title: Option<String>,
}

impl PdfWriter {
    /// Create a new writer targeting the given paper size.
    pub fn new(paper_size: PaperSize) -> Self {
        Self {
            paper_size,
            title: None,
        }
    }

    /// Create a new writer defaulting to A4.
    pub fn a4() -> Self {
        Self::new(PaperSize::A4)
    }

    /// Set a title for the PDF metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Paper dimensions in millimetres for the given orientation.
    fn page_dimensions(&self, orientation: Orientation) -> (f32, f32) {
        orientation.apply(self.paper_size.dimensions_mm())
    }

    // -- Text to PDF ----------------------------------------------------------

    /// Create a PDF from plain text content.
    ///
    /// Each paragraph is word-wrapped to the line width using Helvetica
    /// metrics; lines flow top to bottom and pages break when the bottom
    /// margin is reached. A page holds only the lines whose full height fits
    /// above that margin, so an A4 page carries 36 lines and no line starts
    /// exactly on the margin.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub fn create_from_text(&self, text: &str) -> Result<Vec<u8>> {
        let (page_w, page_h) = self.page_dimensions(Orientation::Portrait);
        let title = self.title.as_deref().unwrap_or("FileForge Document");

        info!(paper = ?self.paper_size, title, "Creating text PDF");

        let measure_mm = |line: &str| StandardFont::Helvetica.text_width(line, TEXT_FONT_SIZE_PT) * MM_PER_PT;
        let lines = layout::wrap_paragraphs(text, TEXT_LINE_WIDTH, measure_mm);
        if lines.is_empty() {
            return Err(FileforgeError::InvalidInput("there is no text to convert".into()));
        }

        let pages = layout::group(
            &lines,
            TEXT_LINE_HEIGHT,
            page_h - TEXT_VERTICAL_MARGIN,
            TEXT_VERTICAL_MARGIN,
        );

        let page_h_pt = Mm(page_h).into_pt().0;
        let left_pt = Mm(TEXT_LEFT_MARGIN).into_pt().0;

        let pdf_pages: Vec<PdfPage> = pages
            .iter()
            .map(|page| {
                let mut ops: Vec<Op> = Vec::new();
                for (line_idx, line) in page.lines.iter().enumerate() {
                    if line.is_empty() {
                        continue;
                    }
                    let y_mm = TEXT_VERTICAL_MARGIN + line_idx as f32 * TEXT_LINE_HEIGHT;
                    let y_pt = page_h_pt - Mm(y_mm).into_pt().0;

                    ops.push(Op::StartTextSection);
                    ops.push(Op::SetTextCursor {
                        pos: Point {
                            x: Pt(left_pt),
                            y: Pt(y_pt),
                        },
                    });
                    ops.push(Op::SetFontSizeBuiltinFont {
                        size: Pt(TEXT_FONT_SIZE_PT),
                        font: BuiltinFont::Helvetica,
                    });
                    ops.push(Op::WriteTextBuiltinFont {
                        items: vec![TextItem::Text(line.clone())],
                        font: BuiltinFont::Helvetica,
                    });
                    ops.push(Op::EndTextSection);
                }
                PdfPage::new(Mm(page_w), Mm(page_h), ops)
            })
            .collect();

        let mut doc = PdfDocument::new(title);
        doc.with_pages(pdf_pages);

        debug!(total_lines = lines.len(), pages = doc.pages.len(), "Text layout complete");

        Ok(save(&doc))
    }

    // -- Images to PDF --------------------------------------------------------

    /// Create a PDF with one page per image.
    ///
    /// Each image is scaled to fit inside the page margins, keeping its
    /// aspect ratio, and centred.
    #[instrument(skip(self, images), fields(images = images.len()))]
    pub fn create_from_images(&self, images: &[ImageProcessor], orientation: Orientation) -> Result<Vec<u8>> {
        if images.is_empty() {
            return Err(FileforgeError::InvalidInput("no images to convert".into()));
        }

        let (page_w, page_h) = self.page_dimensions(orientation);
        let title = self.title.as_deref().unwrap_or("FileForge Images");

        info!(paper = ?self.paper_size, title, "Creating image PDF");

        let margin_pt = Mm(IMAGE_MARGIN).into_pt().0;
        let box_w_pt = Mm(page_w - 2.0 * IMAGE_MARGIN).into_pt().0;
        let box_h_pt = Mm(page_h - 2.0 * IMAGE_MARGIN).into_pt().0;

        let mut doc = PdfDocument::new(title);
        let mut pages: Vec<PdfPage> = Vec::with_capacity(images.len());

        for (index, processor) in images.iter().enumerate() {
            let rgb = processor.flattened_rgb();
            let raw = RawImage {
                pixels: RawImageData::U8(rgb.into_raw()),
                width: processor.width() as usize,
                height: processor.height() as usize,
                data_format: RawImageFormat::RGB8,
                tag: Vec::new(),
            };
            let xobject_id = doc.add_image(&raw);

            // At 72 dpi one pixel is one point, so the fit scale applies directly.
            let fit = layout::fit_image(
                box_w_pt,
                box_h_pt,
                processor.width() as f32,
                processor.height() as f32,
            );

            let ops = vec![Op::UseXobject {
                id: xobject_id,
                transform: XObjectTransform {
                    translate_x: Some(Pt(margin_pt + fit.x)),
                    translate_y: Some(Pt(margin_pt + fit.y)),
                    scale_x: Some(fit.scale),
                    scale_y: Some(fit.scale),
                    dpi: Some(72.0),
                    rotate: None,
                },
            }];

            debug!(index, width_pt = fit.width, height_pt = fit.height, scale = fit.scale, "Image placed on page");
            pages.push(PdfPage::new(Mm(page_w), Mm(page_h), ops));
        }

        doc.with_pages(pages);
        Ok(save(&doc))
    }
}

fn save(doc: &PdfDocument) -> Vec<u8> {
    let mut warnings: Vec<PdfWarnMsg> = Vec::new();
    let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
    if !warnings.is_empty() {
        warn!(count = warnings.len(), "PDF generated with warnings");
    }
    output
}
