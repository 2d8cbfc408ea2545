// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — loading and editing existing PDFs, stamping text onto pages,
// and creating new PDFs from text or images.

pub mod reader;
pub mod stamp;
pub mod writer;

pub use reader::PdfDocument;
pub use stamp::TextStamp;
pub use writer::PdfWriter;
