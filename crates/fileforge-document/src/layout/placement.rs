// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Placement calculator — where to draw text on a page and how to fit an
// image into a box.
//
// Coordinates use a bottom-left origin (PDF user space). No clamping is done:
// content wider than the page yields off-page coordinates.

use fileforge_core::types::{Anchor, HorizontalZone, VerticalZone};

/// Drawing origin in page units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Result of fitting an image inside a box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageFit {
    /// Uniform scale applied to the natural size.
    pub scale: f32,
    /// Offset from the box's left edge.
    pub x: f32,
    /// Offset from the box's bottom edge.
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Origin for text of width `text_width` at `anchor`, `margin` from the edges.
pub fn place_text(page_width: f32, page_height: f32, text_width: f32, anchor: Anchor, margin: f32) -> Point {
    let x = match anchor.horizontal {
        HorizontalZone::Left => margin,
        HorizontalZone::Center => (page_width - text_width) / 2.0,
        HorizontalZone::Right => page_width - text_width - margin,
    };
    let y = match anchor.vertical {
        VerticalZone::Top => page_height - margin,
        VerticalZone::Middle => page_height / 2.0,
        VerticalZone::Bottom => margin,
    };
    Point { x, y }
}

/// Scale an image of natural size `natural_width` x `natural_height` to fit
/// inside the box, keeping its aspect ratio, and centre it.
///
/// Callers must reject zero natural dimensions first; the scale would not be
/// finite.
pub fn fit_image(box_width: f32, box_height: f32, natural_width: f32, natural_height: f32) -> ImageFit {
    let scale = (box_width / natural_width).min(box_height / natural_height);
    let width = natural_width * scale;
    let height = natural_height * scale;
    ImageFit {
        scale,
        x: (box_width - width) / 2.0,
        y: (box_height - height) / 2.0,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bottom_center() {
        let p = place_text(200.0, 300.0, 50.0, Anchor::BOTTOM_CENTER, 10.0);
        assert_eq!(p, Point { x: 75.0, y: 10.0 });
    }

    #[test]
    fn all_page_number_positions() {
        let expected = [
            (Anchor::TOP_LEFT, 10.0, 290.0),
            (Anchor::TOP_CENTER, 75.0, 290.0),
            (Anchor::TOP_RIGHT, 140.0, 290.0),
            (Anchor::BOTTOM_LEFT, 10.0, 10.0),
            (Anchor::BOTTOM_CENTER, 75.0, 10.0),
            (Anchor::BOTTOM_RIGHT, 140.0, 10.0),
        ];
        for (anchor, x, y) in expected {
            assert_eq!(place_text(200.0, 300.0, 50.0, anchor, 10.0), Point { x, y }, "{anchor}");
        }
    }

    #[test]
    fn middle_is_half_height() {
        let p = place_text(600.0, 800.0, 100.0, Anchor::CENTER, 36.0);
        assert_eq!(p, Point { x: 250.0, y: 400.0 });
    }

    #[test]
    fn oversized_text_is_not_clamped() {
        let p = place_text(100.0, 100.0, 300.0, Anchor::BOTTOM_RIGHT, 10.0);
        assert_eq!(p.x, -210.0);
    }

    #[test]
    fn wide_image_fits_width() {
        let fit = fit_image(100.0, 100.0, 200.0, 50.0);
        assert_eq!(fit.scale, 0.5);
        assert_eq!(fit.width, 100.0);
        assert_eq!(fit.height, 25.0);
        assert_eq!(fit.x, 0.0);
        assert_eq!(fit.y, 37.5);
    }

    #[test]
    fn small_image_is_scaled_up() {
        let fit = fit_image(190.0, 277.0, 95.0, 50.0);
        assert_eq!(fit.scale, 2.0);
        assert_eq!((fit.width, fit.height), (190.0, 100.0));
        assert_eq!(fit.y, 88.5);
    }

    #[test]
    fn fitted_image_stays_inside_box() {
        for (w, h) in [(1.0, 1.0), (4000.0, 3000.0), (30.0, 900.0), (640.0, 480.0)] {
            let fit = fit_image(190.0, 277.0, w, h);
            assert!(fit.width <= 190.0 + 1e-3 && fit.height <= 277.0 + 1e-3);
            assert!(fit.x >= -1e-3 && fit.y >= -1e-3);
        }
    }
}
