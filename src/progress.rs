//! Progress-callback trait for per-page extraction events.
//!
//! Inject an [`Arc<dyn ExtractionProgressCallback>`] via
//! [`crate::config::ExtractionConfigBuilder::progress_callback`] to receive
//! events as the extractor walks the document. OCR can take seconds per page,
//! so the binary uses this to drive a progress bar on stderr while stdout is
//! reserved for the JSON report.
//!
//! # Example
//!
//! ```rust
//! use edgequake_pdf2text::{ExtractionConfig, ExtractionProgressCallback, PageSource};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct OcrCounter {
//!     ocr_pages: AtomicUsize,
//! }
//!
//! impl ExtractionProgressCallback for OcrCounter {
//!     fn on_page_complete(&self, _page_num: usize, _total: usize, source: PageSource, _chars: usize) {
//!         if source == PageSource::Ocr {
//!             self.ocr_pages.fetch_add(1, Ordering::SeqCst);
//!         }
//!     }
//! }
//!
//! let config = ExtractionConfig::builder()
//!     .progress_callback(Arc::new(OcrCounter { ocr_pages: AtomicUsize::new(0) }))
//!     .build()
//!     .unwrap();
//! ```

use crate::output::PageSource;
use std::sync::Arc;

/// Called by the extractor as it processes each page.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Pages are processed strictly in order on the calling
/// thread.
pub trait ExtractionProgressCallback: Send + Sync {
    /// Called once after the document is opened, before the first page.
    fn on_extraction_start(&self, total_pages: usize) {
        let _ = total_pages;
    }

    /// Called before the text layer of a page is read.
    ///
    /// # Arguments
    /// * `page_num`: 1-indexed page number
    /// * `total_pages`: total pages in the document
    fn on_page_start(&self, page_num: usize, total_pages: usize) {
        let _ = (page_num, total_pages);
    }

    /// Called when a page falls back to OCR.
    fn on_ocr_fallback(&self, page_num: usize, total_pages: usize) {
        let _ = (page_num, total_pages);
    }

    /// Called when a page's record is complete.
    ///
    /// # Arguments
    /// * `page_num`: 1-indexed page number
    /// * `total_pages`: total pages
    /// * `source`: where the final text came from
    /// * `chars`: character count of the normalized text
    fn on_page_complete(&self, page_num: usize, total_pages: usize, source: PageSource, chars: usize) {
        let _ = (page_num, total_pages, source, chars);
    }

    /// Called once after every page has a record.
    fn on_extraction_complete(&self, total_pages: usize, empty_pages: usize) {
        let _ = (total_pages, empty_pages);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ExtractionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ExtractionConfig`].
pub type ProgressCallback = Arc<dyn ExtractionProgressCallback>;
