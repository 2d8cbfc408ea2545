// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the layout helpers in the fileforge-document crate.
// Covers the text paginator on a long plain-text input measured with real
// Helvetica metrics, and page-selection parsing on a large document.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use fileforge_document::layout::{StandardFont, group, wrap_paragraphs};
use fileforge_document::resolve_selection;

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Wrap and paginate roughly 30 pages of text, the same layout the
/// text-to-PDF converter uses (16 pt Helvetica, 180 mm lines, 7 mm leading).
fn bench_paginate(c: &mut Criterion) {
    let paragraph = "The quick brown fox jumps over the lazy dog while the committee \
                     reviews the quarterly figures and drafts its recommendations. ";
    let text = (0..300)
        .map(|_| paragraph.repeat(3))
        .collect::<Vec<_>>()
        .join("\n");
    let measure = |line: &str| StandardFont::Helvetica.text_width(line, 16.0) * 25.4 / 72.0;

    c.bench_function("wrap_and_group (300 paragraphs)", |b| {
        b.iter(|| {
            let lines = wrap_paragraphs(black_box(&text), 180.0, measure);
            black_box(group(&lines, 7.0, 277.0, 20.0));
        });
    });
}

/// Resolve a mixed selection against a 2000-page document.
fn bench_resolve_selection(c: &mut Criterion) {
    let expression = "1-250, 300, 410-900, abc, 1200-5000, 7, 7, 0-3";

    c.bench_function("resolve_selection (2000 pages)", |b| {
        b.iter(|| black_box(resolve_selection(black_box(expression), 2000)));
    });
}

criterion_group!(benches, bench_paginate, bench_resolve_selection);
criterion_main!(benches);
