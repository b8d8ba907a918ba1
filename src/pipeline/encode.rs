//! Image encoding: `RasterImage` → PNG bytes for the OCR engine.
//!
//! PNG is lossless; JPEG ringing around glyph edges measurably hurts
//! Tesseract on small Indic scripts. The bytes are written straight into the
//! engine's stdin, so no image file is ever created.

use crate::error::OcrError;
use crate::pipeline::render::RasterImage;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use tracing::debug;

/// Encode a rendered page as PNG.
pub fn encode_png(image: &RasterImage) -> Result<Vec<u8>, OcrError> {
    let color = match image.channels() {
        1 => ExtendedColorType::L8,
        _ => ExtendedColorType::Rgb8,
    };

    let mut buf = Vec::new();
    PngEncoder::new(&mut buf).write_image(image.pixels(), image.width(), image.height(), color)?;

    debug!("Encoded {}x{} image → {} bytes PNG", image.width(), image.height(), buf.len());
    Ok(buf)
}
