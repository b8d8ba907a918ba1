//! Per-page extraction: text layer first, OCR as a fallback.
//!
//! ```text
//! text layer ──meaningful──▶ TextLayer
//!     │
//!     ├─ OCR disabled ─────▶ Empty  (source "text-layer")
//!     │
//!     └─ render ─▶ OCR psm 6 ──meaningful──▶ Ocr
//!                     │
//!                     └─▶ OCR psm 3 ──meaningful──▶ Ocr
//!                                  └─────────────▶ Empty (source "ocr")
//! ```
//!
//! Any error from pdfium or the OCR engine is returned as-is and aborts the
//! run; there is no per-page recovery.

use crate::config::ExtractionConfig;
use crate::error::Pdf2TextError;
use crate::output::{PageRecord, PageResolution, PageSource};
use crate::pipeline::document::PdfDocumentSource;
use crate::pipeline::normalize::{is_meaningful, normalize};
use crate::pipeline::ocr::{OcrEngine, OcrRequest, FALLBACK_SEGMENTATION, PRIMARY_SEGMENTATION};
use crate::pipeline::render::RasterImage;
use tracing::debug;

/// The finished record for one page and how it is counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOutcome {
    pub record: PageRecord,
    pub resolution: PageResolution,
}

/// Resolve the page at 0-based `index`.
pub fn extract_page<D, O>(
    document: &D,
    index: usize,
    config: &ExtractionConfig,
    ocr: &O,
) -> Result<PageOutcome, Pdf2TextError>
where
    D: PdfDocumentSource + ?Sized,
    O: OcrEngine + ?Sized,
{
    let page_num = index + 1;
    let text = normalize(&document.page_text(index)?);

    if is_meaningful(&text) {
        debug!("Page {}: text layer, {} bytes", page_num, text.len());
        return Ok(PageOutcome {
            record: PageRecord::new(page_num, text, PageSource::TextLayer),
            resolution: PageResolution::TextLayer,
        });
    }

    if !config.ocr_enabled {
        debug!("Page {}: no text layer, OCR disabled", page_num);
        return Ok(PageOutcome {
            record: PageRecord::new(page_num, text, PageSource::TextLayer),
            resolution: PageResolution::Empty,
        });
    }

    if let Some(ref cb) = config.progress_callback {
        cb.on_ocr_fallback(page_num, document.page_count());
    }
    let image = document.render_page(index, config.ocr_dpi)?;
    let text = ocr_page(image, page_num, config, ocr)?;
    let resolution = if is_meaningful(&text) {
        PageResolution::Ocr
    } else {
        PageResolution::Empty
    };

    Ok(PageOutcome {
        record: PageRecord::new(page_num, text, PageSource::Ocr),
        resolution,
    })
}

/// Run the primary OCR pass and, if it yields nothing, the fallback pass.
///
/// The fallback result is used even when it is blank too.
fn ocr_page<O>(
    image: RasterImage,
    page_num: usize,
    config: &ExtractionConfig,
    ocr: &O,
) -> Result<String, Pdf2TextError>
where
    O: OcrEngine + ?Sized,
{
    let recognize = |request: OcrRequest<'_>| {
        ocr.recognize(&image, &request)
            .map(|raw| normalize(&raw))
            .map_err(|source| Pdf2TextError::Ocr {
                page: page_num,
                source,
            })
    };

    let text = recognize(OcrRequest::new(&config.ocr_languages, PRIMARY_SEGMENTATION))?;
    if is_meaningful(&text) {
        debug!("Page {}: OCR psm {} → {} bytes", page_num, PRIMARY_SEGMENTATION.psm(), text.len());
        return Ok(text);
    }

    debug!(
        "Page {}: OCR psm {} empty, retrying with psm {}",
        page_num,
        PRIMARY_SEGMENTATION.psm(),
        FALLBACK_SEGMENTATION.psm()
    );
    recognize(OcrRequest::new(&config.ocr_languages, FALLBACK_SEGMENTATION))
}
