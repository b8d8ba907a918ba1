//! Document loading: bind pdfium and open the PDF byte buffer.
//!
//! The rest of the pipeline talks to the [`PdfDocumentSource`] trait rather
//! than to pdfium directly, so the page state machine can be exercised with
//! in-memory documents in tests.

use crate::error::Pdf2TextError;
use crate::pipeline::render::{self, RasterImage};
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// A parsed, page-addressable PDF. Pages are 0-indexed here; errors report
/// 1-indexed page numbers.
pub trait PdfDocumentSource {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Raw embedded text layer of a page (not yet normalized).
    fn page_text(&self, index: usize) -> Result<String, Pdf2TextError>;

    /// Rasterise a page at `dpi`.
    fn render_page(&self, index: usize, dpi: u32) -> Result<RasterImage, Pdf2TextError>;
}

/// Bind to a pdfium shared library.
///
/// Resolution order: `library` if given, then a library in the working
/// directory, then the system library search path.
pub fn bind_pdfium(library: Option<&Path>) -> Result<Pdfium, Pdf2TextError> {
    let bindings = match library {
        Some(path) => {
            debug!("Binding pdfium from {}", path.display());
            Pdfium::bind_to_library(path)
        }
        None => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library()),
    }
    .map_err(|e| Pdf2TextError::PdfiumBindingFailed(format!("{:?}", e)))?;

    Ok(Pdfium::new(bindings))
}

/// Parse `bytes` as a PDF.
pub fn open_document<'a>(pdfium: &'a Pdfium, bytes: &'a [u8]) -> Result<PdfiumDocument<'a>, Pdf2TextError> {
    let document = pdfium
        .load_pdf_from_byte_slice(bytes, None)
        .map_err(|e| Pdf2TextError::DocumentOpen {
            detail: format!("{:?}", e),
        })?;

    info!("PDF loaded: {} pages", document.pages().len());
    Ok(PdfiumDocument { document })
}

/// [`PdfDocumentSource`] backed by pdfium.
pub struct PdfiumDocument<'a> {
    document: PdfDocument<'a>,
}

impl<'a> PdfiumDocument<'a> {
    fn page(&self, index: usize) -> Result<PdfPage<'a>, PdfiumError> {
        self.document.pages().get(index as PdfPageIndex)
    }
}

impl PdfDocumentSource for PdfiumDocument<'_> {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn page_text(&self, index: usize) -> Result<String, Pdf2TextError> {
        let to_err = |e: PdfiumError| Pdf2TextError::TextExtractionFailed {
            page: index + 1,
            detail: format!("{:?}", e),
        };
        let page = self.page(index).map_err(to_err)?;
        let text = page.text().map_err(to_err)?;
        Ok(text.all())
    }

    fn render_page(&self, index: usize, dpi: u32) -> Result<RasterImage, Pdf2TextError> {
        let page = self
            .page(index)
            .map_err(|e| Pdf2TextError::RasterisationFailed {
                page: index + 1,
                detail: format!("{:?}", e),
            })?;
        render::render_page(&page, index + 1, dpi)
    }
}
