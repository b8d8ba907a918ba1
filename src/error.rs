//! Error types for the edgequake-pdf2text library.
//!
//! Two error types reflect two layers of failure:
//!
//! * [`Pdf2TextError`]: fatal, extraction stops. Only two variants
//!   ([`Pdf2TextError::EmptyInput`] and [`Pdf2TextError::DocumentOpen`]) are
//!   user-visible input failures; the binary reports them as a JSON error
//!   object with exit status 2. Everything else aborts the run.
//!
//! * [`OcrError`]: a failure inside the OCR engine hand-off (spawning the
//!   engine, piping the image, non-zero exit). It is wrapped into
//!   [`Pdf2TextError::Ocr`] together with the page number.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// All fatal errors returned by the edgequake-pdf2text library.
#[derive(Debug, Error)]
pub enum Pdf2TextError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Standard input was empty.
    #[error("No PDF bytes received on stdin")]
    EmptyInput,

    /// Reading the input stream itself failed.
    #[error("Failed to read PDF bytes: {0}")]
    InputRead(#[source] std::io::Error),

    // ── PDF errors ────────────────────────────────────────────────────────
    /// pdfium could not parse the byte buffer as a PDF.
    #[error("Failed to open PDF: {detail}")]
    DocumentOpen { detail: String },

    /// pdfium could not produce the text layer of a page.
    #[error("Text extraction failed for page {page}: {detail}")]
    TextExtractionFailed { page: usize, detail: String },

    /// pdfium-render returned an error while rasterising a page.
    #[error("Rasterisation failed for page {page}: {detail}")]
    RasterisationFailed { page: usize, detail: String },

    // ── OCR errors ────────────────────────────────────────────────────────
    /// The OCR engine failed on a page.
    #[error("OCR failed for page {page}: {source}")]
    Ocr {
        page: usize,
        #[source]
        source: OcrError,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder or environment validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
You can:\n\
  • Set PDFIUM_LIB_PATH=/path/to/libpdfium to use an existing copy.\n\
  • Place libpdfium next to the working directory.\n\
  • Install pdfium into a system library path.\n"
    )]
    PdfiumBindingFailed(String),
}

impl Pdf2TextError {
    /// `true` for the failures reported as `{"error": ...}` with exit status 2.
    pub fn is_input_failure(&self) -> bool {
        matches!(self, Self::EmptyInput | Self::DocumentOpen { .. })
    }
}

/// Failure while handing a rendered page to the OCR engine.
#[derive(Debug, Error)]
pub enum OcrError {
    /// The engine executable could not be started.
    #[error("could not start OCR engine '{program}': {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the image to, or reading text from, the engine failed.
    #[error("OCR engine pipe error: {0}")]
    Pipe(#[source] std::io::Error),

    /// The engine exited unsuccessfully.
    #[error("OCR engine exited with {status}: {stderr}")]
    EngineFailed { status: ExitStatus, stderr: String },

    /// PNG encoding of the rendered page failed.
    #[error("failed to encode page image: {0}")]
    Encode(#[from] image::ImageError),

    /// The raster buffer does not match its declared dimensions.
    #[error("raster buffer of {len} bytes does not match {width}x{height}x{channels}")]
    InvalidImage {
        width: u32,
        height: u32,
        channels: u8,
        len: usize,
    },
}
