//! Pipeline stages for page text extraction.
//!
//! Each submodule implements one step; the page state machine in [`page`]
//! ties them together.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ document ──▶ page ──┬──▶ normalize            (text layer)
//! (stdin)   (pdfium)            └──▶ render ─▶ encode ─▶ ocr ─▶ normalize
//!                                    (pixels)  (PNG)   (tesseract)
//! ```
//!
//! 1. [`input`]: read all bytes; reject empty input
//! 2. [`document`]: bind pdfium and parse the bytes
//! 3. [`page`]: text layer first, OCR fallback with one retry
//! 4. [`render`]: rasterise a page at the OCR DPI
//! 5. [`encode`]: PNG-encode the raster in memory
//! 6. [`ocr`]: run Tesseract over stdin/stdout
//! 7. [`normalize`]: NUL stripping, line endings, trimming

pub mod document;
pub mod encode;
pub mod input;
pub mod normalize;
pub mod ocr;
pub mod page;
pub mod render;
