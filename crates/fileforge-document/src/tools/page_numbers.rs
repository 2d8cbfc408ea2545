// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page numbers — stamp a running number on every page.

use fileforge_core::error::{FileforgeError, Result};
use fileforge_core::{Anchor, Artifact, InputFile, PageNumberOptions, Rgb};
use tracing::{debug, instrument};

use super::load_pdf;
use crate::layout::{StandardFont, place_text};
use crate::pdf::TextStamp;

const NUMBER_FONT: StandardFont = StandardFont::Helvetica;
const NUMBER_COLOR: Rgb = Rgb::new(0.3, 0.3, 0.3);

/// Number every page and write `{base}_numbered.pdf`.
///
/// Page `i` (zero-based) shows `start_number + i`; the "of" format counts up
/// to the number printed on the last page.
#[instrument(skip(file), fields(file = %file.name))]
pub fn add_page_numbers(file: &InputFile, options: &PageNumberOptions) -> Result<Artifact> {
    if !Anchor::PAGE_NUMBER_POSITIONS.contains(&options.position) {
        return Err(FileforgeError::InvalidOption(format!(
            "page numbers cannot be placed at {}",
            options.position
        )));
    }
    if options.font_size <= 0.0 {
        return Err(FileforgeError::InvalidOption(format!(
            "font size must be positive, got {}",
            options.font_size
        )));
    }

    let mut document = load_pdf(file)?;
    let total = document.page_count();
    let last = total as i64 + options.start_number - 1;

    for index in 0..total {
        let number = index as i64 + options.start_number;
        let label = options.format.render(number, last);
        let text_width = NUMBER_FONT.text_width(&label, options.font_size);
        let (width, height) = document.page_size(index)?;
        let origin = place_text(width, height, text_width, options.position, options.margin);

        let stamp = TextStamp::new(label, origin.x, origin.y, NUMBER_FONT, options.font_size)
            .color(NUMBER_COLOR);
        document.stamp_text(index, &stamp)?;
    }

    debug!(pages = total, first = options.start_number, last, "Page numbers added");
    Ok(Artifact::new(
        format!("{}_numbered.pdf", file.pdf_base_name()),
        document.to_bytes()?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::PdfDocument;
    use crate::pdf::testing::sample_pdf;
    use fileforge_core::PageNumberFormat;

    fn input() -> InputFile {
        InputFile::new(
            "thesis.pdf",
            sample_pdf(&[(612.0, 792.0, "alpha"), (612.0, 792.0, "beta"), (612.0, 792.0, "gamma")]),
        )
    }

    #[test]
    fn plain_numbers_from_one() {
        let artifact = add_page_numbers(&input(), &PageNumberOptions::default()).unwrap();
        assert_eq!(artifact.file_name, "thesis_numbered.pdf");

        let text = PdfDocument::from_bytes(&artifact.bytes).unwrap().extract_text();
        for n in ["1", "2", "3"] {
            assert!(text.contains(n), "missing {n} in {text:?}");
        }
    }

    #[test]
    fn of_total_counts_from_start_number() {
        let options = PageNumberOptions {
            start_number: 5,
            format: PageNumberFormat::OfTotal,
            position: Anchor::TOP_RIGHT,
            ..PageNumberOptions::default()
        };
        let artifact = add_page_numbers(&input(), &options).unwrap();
        let text = PdfDocument::from_bytes(&artifact.bytes).unwrap().extract_text();
        assert!(text.contains("5 of 7"));
        assert!(text.contains("7 of 7"));
    }

    #[test]
    fn middle_position_is_not_offered() {
        let options = PageNumberOptions {
            position: Anchor::CENTER,
            ..PageNumberOptions::default()
        };
        assert!(matches!(
            add_page_numbers(&input(), &options),
            Err(FileforgeError::InvalidOption(_))
        ));
    }
}
