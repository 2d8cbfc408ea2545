// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Merge — concatenate several PDFs into one, in the order given.

use fileforge_core::error::{FileforgeError, Result};
use fileforge_core::{Artifact, InputFile};
use tracing::{debug, instrument};

use super::{load_pdf, output_name};

/// Combine `files` into `{name}.pdf` (default `merged.pdf`).
#[instrument(skip_all, fields(files = files.len()))]
pub fn merge(files: &[InputFile], name: &str) -> Result<Artifact> {
    if files.len() < 2 {
        return Err(FileforgeError::InvalidInput(
            "select at least two PDF files to merge".into(),
        ));
    }

    let mut merged = load_pdf(&files[0])?;
    for file in &files[1..] {
        let next = load_pdf(file)?;
        debug!(file = %file.name, pages = next.page_count(), "Appending document");
        merged.append(next)?;
    }

    Ok(Artifact::new(output_name(name, "merged", "pdf"), merged.to_bytes()?))
}
