// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Advance widths of the standard Type1 fonts used for stamped and generated
// text, in thousandths of an em (Adobe AFM values).

/// Width used for glyphs outside the tables.
const DEFAULT_WIDTH: u16 = 556;

/// Helvetica, ASCII 32..=126.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

/// Helvetica-Bold, ASCII 32..=126.
#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

/// One of the standard PDF fonts every viewer provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StandardFont {
    #[default]
    Helvetica,
    HelveticaBold,
}

impl StandardFont {
    /// PostScript name used in the font dictionary.
    pub fn base_font_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
        }
    }

    fn table(&self) -> &'static [u16; 95] {
        match self {
            Self::Helvetica => &HELVETICA,
            Self::HelveticaBold => &HELVETICA_BOLD,
        }
    }

    /// Advance width of `c` in thousandths of an em.
    pub fn glyph_width(&self, c: char) -> u16 {
        let code = c as u32;
        if (32..=126).contains(&code) {
            self.table()[(code - 32) as usize]
        } else {
            DEFAULT_WIDTH
        }
    }

    /// Width of `text` set at `size` points, in points.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| u32::from(self.glyph_width(c))).sum();
        units as f32 * size / 1000.0
    }
}
