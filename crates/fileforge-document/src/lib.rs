// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// fileforge-document — Document processing for the FileForge toolkit.
//
// Provides the pure layout helpers (page selections, text wrapping and
// pagination, text and image placement, standard font metrics), PDF
// operations (load, merge, extract, rotate, stamp text, compress, extract
// text, create from text or images) and the per-tool pipelines built on them.

pub mod image;
pub mod layout;
pub mod pdf;
pub mod tools;

// Re-export the primary structs so callers can use `fileforge_document::PdfDocument` etc.
pub use image::processor::ImageProcessor;
pub use layout::selection::{SelectionSet, resolve_selection};
pub use pdf::reader::PdfDocument;
pub use pdf::writer::PdfWriter;
pub use tools::{ToolOutput, ToolReport, ToolRequest};
