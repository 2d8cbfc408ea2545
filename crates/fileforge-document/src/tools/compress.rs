// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Compress — rewrite a PDF without unused objects and with compressed streams.

use fileforge_core::error::Result;
use fileforge_core::{Artifact, InputFile, format_size};
use serde::Serialize;
use tracing::{info, instrument};

use super::load_pdf;

/// Sizes before and after compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompressionReport {
    pub original_size: u64,
    pub compressed_size: u64,
    /// Whole percent saved; never negative.
    pub reduction_percent: u32,
}

impl CompressionReport {
    pub fn new(original_size: u64, compressed_size: u64) -> Self {
        Self {
            original_size,
            compressed_size,
            reduction_percent: reduction_percent(original_size, compressed_size),
        }
    }

    /// e.g. `1.2 MB -> 800.0 KB (33% smaller)`.
    pub fn summary(&self) -> String {
        format!(
            "{} -> {} ({}% smaller)",
            format_size(self.original_size),
            format_size(self.compressed_size),
            self.reduction_percent
        )
    }
}

/// `max(0, round((original - compressed) / original * 100))`.
fn reduction_percent(original: u64, compressed: u64) -> u32 {
    if original == 0 || compressed >= original {
        return 0;
    }
    ((original - compressed) as f64 / original as f64 * 100.0).round() as u32
}

/// Write `{base}_compressed.pdf` and report the size change.
#[instrument(skip(file), fields(file = %file.name, original = file.size()))]
pub fn compress(file: &InputFile) -> Result<(Artifact, CompressionReport)> {
    let mut document = load_pdf(file)?;
    document.compress();
    let bytes = document.to_bytes()?;

    let report = CompressionReport::new(file.size(), bytes.len() as u64);
    info!(compressed = report.compressed_size, reduction = report.reduction_percent, "PDF compressed");

    Ok((
        Artifact::new(format!("{}_compressed.pdf", file.pdf_base_name()), bytes),
        report,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::PdfDocument;
    use crate::pdf::testing::sample_pdf;

    #[test]
    fn reduction_is_rounded_and_never_negative() {
        assert_eq!(reduction_percent(1000, 500), 50);
        assert_eq!(reduction_percent(1000, 994), 1);
        assert_eq!(reduction_percent(1000, 996), 0);
        assert_eq!(reduction_percent(1000, 1200), 0);
        assert_eq!(reduction_percent(0, 10), 0);
    }

    #[test]
    fn summary_uses_human_sizes() {
        let report = CompressionReport::new(2048, 1024);
        assert_eq!(report.summary(), "2.0 KB -> 1.0 KB (50% smaller)");
    }

    #[test]
    fn output_is_a_valid_pdf() {
        let text = "word ".repeat(400);
        let file = InputFile::new("big.pdf", sample_pdf(&[(612.0, 792.0, &text), (612.0, 792.0, "b")]));
        let (artifact, report) = compress(&file).unwrap();

        assert_eq!(artifact.file_name, "big_compressed.pdf");
        assert_eq!(report.original_size, file.size());
        assert_eq!(report.compressed_size, artifact.size());
        assert_eq!(PdfDocument::from_bytes(&artifact.bytes).unwrap().page_count(), 2);
    }
}
