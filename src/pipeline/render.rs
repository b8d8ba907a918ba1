//! Rasterisation: render one PDF page to an in-memory RGB pixel buffer.
//!
//! ## Why scale by factor, not target width?
//!
//! OCR accuracy depends on glyph height in pixels, not on the image fitting
//! some API limit. Tesseract is tuned for roughly 300 DPI scans, so the page
//! is scaled by `dpi / 72` (PDF user space is 72 units per inch) and the
//! resulting size follows the physical page size.
//!
//! The render is converted to 8-bit RGB immediately. The alpha channel is
//! dropped without blending; pdfium already fills the bitmap with white
//! before drawing the page.

use crate::error::{OcrError, Pdf2TextError};
use image::DynamicImage;
use pdfium_render::prelude::*;
use tracing::debug;

/// PDF user-space units per inch.
const POINTS_PER_INCH: f32 = 72.0;

/// A rendered page: raw pixels plus their layout.
///
/// Moved by value from the renderer to the OCR engine; it never touches disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
}

impl RasterImage {
    /// Wrap a row-major 8-bit pixel buffer. `channels` is 1 (gray) or 3 (RGB).
    pub fn new(pixels: Vec<u8>, width: u32, height: u32, channels: u8) -> Result<Self, OcrError> {
        let expected = width as usize * height as usize * channels as usize;
        if !matches!(channels, 1 | 3) || pixels.len() != expected {
            return Err(OcrError::InvalidImage {
                width,
                height,
                channels,
                len: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
            channels,
        })
    }

    /// Flatten any decoded image to RGB, dropping alpha.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        let rgb = image.into_rgb8();
        let (width, height) = rgb.dimensions();
        Self {
            pixels: rgb.into_raw(),
            width,
            height,
            channels: 3,
        }
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }
}

/// Scale factor pdfium applies for a given DPI.
pub fn scale_for_dpi(dpi: u32) -> f32 {
    dpi as f32 / POINTS_PER_INCH
}

/// Render `page` at `dpi`. `page_num` is 1-indexed and only used in errors.
pub fn render_page(page: &PdfPage, page_num: usize, dpi: u32) -> Result<RasterImage, Pdf2TextError> {
    let render_config = PdfRenderConfig::new().scale_page_by_factor(scale_for_dpi(dpi));

    let bitmap = page
        .render_with_config(&render_config)
        .map_err(|e| Pdf2TextError::RasterisationFailed {
            page: page_num,
            detail: format!("{:?}", e),
        })?;

    let image = RasterImage::from_dynamic(bitmap.as_image());
    debug!(
        "Rendered page {} at {} DPI → {}x{} px",
        page_num,
        dpi,
        image.width(),
        image.height()
    );

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn scale_matches_points_per_inch() {
        assert_eq!(scale_for_dpi(72), 1.0);
        assert!((scale_for_dpi(300) - 4.1666665).abs() < 1e-5);
    }

    #[test]
    fn from_dynamic_drops_alpha() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 2, Rgba([10, 20, 30, 0])));
        let raster = RasterImage::from_dynamic(img);
        assert_eq!(raster.channels(), 3);
        assert_eq!((raster.width(), raster.height()), (4, 2));
        assert_eq!(raster.pixels().len(), 4 * 2 * 3);
        assert_eq!(&raster.pixels()[..3], &[10, 20, 30]);
    }

    #[test]
    fn new_rejects_mismatched_buffer() {
        assert!(RasterImage::new(vec![0; 12], 2, 2, 3).is_ok());
        assert!(RasterImage::new(vec![0; 4], 2, 2, 1).is_ok());
        assert!(RasterImage::new(vec![0; 11], 2, 2, 3).is_err());
        assert!(RasterImage::new(vec![0; 16], 2, 2, 4).is_err());
    }
}
