// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout module — library-independent geometry and text helpers used by the
// tools: page selections, wrapping and pagination, placement, font metrics.

pub mod metrics;
pub mod paginate;
pub mod placement;
pub mod selection;

pub use metrics::StandardFont;
pub use paginate::{Page, group, wrap, wrap_paragraphs};
pub use placement::{ImageFit, Point, fit_image, place_text};
pub use selection::{SelectionSet, resolve_selection};
