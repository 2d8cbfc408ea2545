// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Watermark — stamp translucent, rotated text across the middle of every page.

use fileforge_core::error::{FileforgeError, Result};
use fileforge_core::{Anchor, Artifact, InputFile, WatermarkOptions};
use tracing::{debug, instrument};

use super::load_pdf;
use crate::layout::{StandardFont, place_text};
use crate::pdf::TextStamp;

const WATERMARK_FONT: StandardFont = StandardFont::HelveticaBold;

/// Stamp `options.text` on every page and write `{base}_watermarked.pdf`.
#[instrument(skip(file, options), fields(file = %file.name, text = %options.text))]
pub fn watermark(file: &InputFile, options: &WatermarkOptions) -> Result<Artifact> {
    let text = options.text.trim();
    if text.is_empty() {
        return Err(FileforgeError::InvalidInput("watermark text is empty".into()));
    }
    if options.font_size <= 0.0 {
        return Err(FileforgeError::InvalidOption(format!(
            "font size must be positive, got {}",
            options.font_size
        )));
    }

    let mut document = load_pdf(file)?;
    let text_width = WATERMARK_FONT.text_width(&options.text, options.font_size);

    for index in 0..document.page_count() {
        let (width, height) = document.page_size(index)?;
        let origin = place_text(width, height, text_width, Anchor::CENTER, 0.0);
        let stamp = TextStamp::new(&options.text, origin.x, origin.y, WATERMARK_FONT, options.font_size)
            .color(options.color.rgb())
            .opacity(options.opacity)
            .rotated(options.rotation_deg);
        document.stamp_text(index, &stamp)?;
    }

    debug!(pages = document.page_count(), text_width, "Watermark applied");
    Ok(Artifact::new(
        format!("{}_watermarked.pdf", file.pdf_base_name()),
        document.to_bytes()?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::PdfDocument;
    use crate::pdf::testing::sample_pdf;

    fn input() -> InputFile {
        InputFile::new("contract.pdf", sample_pdf(&[(612.0, 792.0, "one"), (612.0, 792.0, "two")]))
    }

    #[test]
    fn every_page_carries_the_text() {
        let artifact = watermark(&input(), &WatermarkOptions::default()).unwrap();
        assert_eq!(artifact.file_name, "contract_watermarked.pdf");

        let doc = PdfDocument::from_bytes(&artifact.bytes).unwrap();
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.extract_text().matches("CONFIDENTIAL").count(), 2);
    }

    #[test]
    fn blank_text_is_rejected() {
        let options = WatermarkOptions {
            text: "   ".into(),
            ..WatermarkOptions::default()
        };
        assert!(matches!(watermark(&input(), &options), Err(FileforgeError::InvalidInput(_))));
    }
}
