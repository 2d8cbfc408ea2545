// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Split — one single-page PDF per selected page.

use fileforge_core::error::{FileforgeError, Result};
use fileforge_core::{Artifact, InputFile};
use tracing::{debug, instrument};

use super::load_pdf;
use crate::layout::resolve_selection;
use crate::pdf::PdfDocument;

/// Extract each page selected by `pages` (e.g. `1-3, 5`) as
/// `{base}_page_{n}.pdf`, in ascending page order.
#[instrument(skip(file), fields(file = %file.name))]
pub fn split(file: &InputFile, pages: &str) -> Result<Vec<Artifact>> {
    let document = load_pdf(file)?;
    let selection = resolve_selection(pages, document.page_count());
    if selection.is_empty() {
        return Err(FileforgeError::EmptySelection);
    }

    debug!(selected = selection.len(), total = document.page_count(), "Splitting PDF");
    single_pages(&document, file.pdf_base_name(), selection.iter())
}

/// Write each page index in `indices` to its own document.
pub(crate) fn single_pages(
    document: &PdfDocument,
    base_name: &str,
    indices: impl IntoIterator<Item = usize>,
) -> Result<Vec<Artifact>> {
    indices
        .into_iter()
        .map(|index| -> Result<Artifact> {
            let mut page = document.extract_pages(&[index])?;
            Ok(Artifact::new(
                format!("{}_page_{}.pdf", base_name, index + 1),
                page.to_bytes()?,
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::testing::sample_pdf;

    fn five_pages() -> InputFile {
        let pages: Vec<(f32, f32, &str)> = (1..=5).map(|i| (100.0 * i as f32, 100.0, "p")).collect();
        InputFile::new("Report.PDF", sample_pdf(&pages))
    }

    #[test]
    fn one_file_per_selected_page() {
        let artifacts = split(&five_pages(), "4, 1-2").unwrap();
        let names: Vec<_> = artifacts.iter().map(|a| a.file_name.as_str()).collect();
        assert_eq!(names, ["Report_page_1.pdf", "Report_page_2.pdf", "Report_page_4.pdf"]);

        let fourth = PdfDocument::from_bytes(&artifacts[2].bytes).unwrap();
        assert_eq!(fourth.page_count(), 1);
        assert_eq!(fourth.page_size(0).unwrap(), (400.0, 100.0));
    }

    #[test]
    fn nothing_selected_is_an_error() {
        assert!(matches!(split(&five_pages(), "9, abc"), Err(FileforgeError::EmptySelection)));
        assert!(matches!(split(&five_pages(), ""), Err(FileforgeError::EmptySelection)));
    }
}
