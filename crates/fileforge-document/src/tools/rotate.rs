// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rotate — turn every page, or individual pages, by multiples of 90 degrees.

use fileforge_core::error::Result;
use fileforge_core::{Artifact, InputFile, RotationPlan};
use tracing::{debug, instrument};

use super::load_pdf;

/// Apply `plan` on top of each page's current rotation and write
/// `{base}_rotated.pdf`. Pages whose extra angle is 0 are left untouched.
#[instrument(skip(file), fields(file = %file.name))]
pub fn rotate(file: &InputFile, plan: &RotationPlan) -> Result<Artifact> {
    let mut document = load_pdf(file)?;

    for index in 0..document.page_count() {
        let angle = plan.angle_for(index);
        if angle != 0 {
            let rotation = document.rotate(index, angle)?;
            debug!(index, angle, rotation, "Page turned");
        }
    }

    Ok(Artifact::new(
        format!("{}_rotated.pdf", file.pdf_base_name()),
        document.to_bytes()?,
    ))
}
