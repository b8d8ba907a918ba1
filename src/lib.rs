//! # edgequake-pdf2text
//!
//! Extract per-page text from a PDF as JSON, falling back to Tesseract OCR
//! for pages without a usable text layer.
//!
//! ## Why this crate?
//!
//! Scanned government and archival PDFs (Gujarati and Hindi especially) mix
//! born-digital pages with image-only pages. Running OCR on everything is
//! slow and degrades pages that already carry exact text; running a text
//! extractor alone returns nothing for scans. This crate reads each page's
//! text layer through pdfium and only renders and OCRs the pages where that
//! comes back blank.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF bytes (stdin)
//!  │
//!  ├─ 1. Input      read everything, reject empty input
//!  ├─ 2. Document   parse via pdfium
//!  ├─ 3. Page       text layer → normalize → meaningful?
//!  │                   └─ no: render @ DPI → tesseract psm 6 → (psm 3)
//!  ├─ 4. Stats      text-layer / OCR / empty counts
//!  └─ 5. Report     {"pages": [...], "stats": {...}} or {"error": "..."}
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edgequake_pdf2text::{extract_from_bytes, ExtractionConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExtractionConfig::from_env()?;
//!     let bytes = std::fs::read("scan.pdf")?;
//!     let output = extract_from_bytes(&bytes, &config)?;
//!     for page in &output.pages {
//!         println!("{} [{}] {} chars", page.page_number, page.source.as_str(), page.chars);
//!     }
//!     eprintln!("{} of {} pages needed OCR", output.stats.ocr_pages, output.stats.total_pages);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2text` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! ## Runtime requirements
//!
//! - A pdfium shared library (`PDFIUM_LIB_PATH`, the working directory, or
//!   the system library path).
//! - The `tesseract` executable with the configured language data, only
//!   when a page actually needs OCR.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod extract;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ExtractionConfig, ExtractionConfigBuilder, OcrLanguages};
pub use error::{OcrError, Pdf2TextError};
pub use extract::{extract_document, extract_from_bytes, extract_from_reader, run};
pub use output::{ExtractionOutput, ExtractionStats, PageRecord, PageResolution, PageSource, Report};
pub use pipeline::document::PdfDocumentSource;
pub use pipeline::normalize::{is_meaningful, normalize};
pub use pipeline::ocr::{OcrEngine, OcrRequest, SegmentationMode, TesseractCli};
pub use pipeline::render::RasterImage;
pub use progress::{ExtractionProgressCallback, NoopProgressCallback, ProgressCallback};
