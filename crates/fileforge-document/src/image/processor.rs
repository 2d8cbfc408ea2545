// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — decode JPEG, PNG and WebP input and hand its pixels to
// the PDF writer. Operates on in-memory images using the `image` crate.

use fileforge_core::error::{FileforgeError, Result};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use tracing::{debug, instrument};

/// A decoded image with non-zero dimensions.
pub struct ImageProcessor {
    /// The decoded image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Decode an image from raw encoded bytes (JPEG, PNG, WebP).
    ///
    /// Images with a zero width or height are rejected, since nothing can be
    /// scaled to fit from them.
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(data)
            .map_err(|err| FileforgeError::Image(format!("failed to decode image: {}", err)))?;
        debug!(width = img.width(), height = img.height(), "Image decoded from bytes");
        Self::from_dynamic(img)
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Result<Self> {
        if image.width() == 0 || image.height() == 0 {
            return Err(FileforgeError::Image(format!(
                "image has no pixels ({}x{})",
                image.width(),
                image.height()
            )));
        }
        Ok(Self { image })
    }

    // -- Accessors ------------------------------------------------------------

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    // -- Output ---------------------------------------------------------------

    /// Pixels as 8-bit RGB, with any transparency composited onto white.
    pub fn flattened_rgb(&self) -> RgbImage {
        if !self.image.color().has_alpha() {
            return self.image.to_rgb8();
        }

        let rgba = self.image.to_rgba8();
        RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
            let [r, g, b, a] = rgba.get_pixel(x, y).0;
            let alpha = u16::from(a);
            let blend = |channel: u8| ((u16::from(channel) * alpha + 255 * (255 - alpha)) / 255) as u8;
            Rgb([blend(r), blend(g), blend(b)])
        })
    }

    /// Encode the image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);
        self.image
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|err| FileforgeError::Image(format!("image encoding failed: {}", err)))?;
        Ok(buffer)
    }
}
