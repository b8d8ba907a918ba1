//! Extraction entry points.
//!
//! The pipeline is strictly sequential: page `i + 1` is not touched until
//! page `i`'s record is complete. The first error aborts the run.

use crate::config::ExtractionConfig;
use crate::error::Pdf2TextError;
use crate::output::{ExtractionOutput, ExtractionStats, Report};
use crate::pipeline::document::{self, PdfDocumentSource};
use crate::pipeline::ocr::{OcrEngine, TesseractCli};
use crate::pipeline::{input, page};
use std::io::Read;
use std::time::Instant;
use tracing::info;

/// Read a PDF from `reader` and produce the report the binary prints.
///
/// Input failures (empty stream, unparseable PDF) become
/// [`Report::Failure`]; every other error is returned as `Err`.
pub fn run<R: Read>(reader: R, config: &ExtractionConfig) -> Result<Report, Pdf2TextError> {
    Report::from_result(extract_from_reader(reader, config))
}

/// Read all of `reader` and extract every page.
pub fn extract_from_reader<R: Read>(
    reader: R,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, Pdf2TextError> {
    let bytes = input::read_input(reader)?;
    extract_from_bytes(&bytes, config)
}

/// Extract every page of an in-memory PDF using pdfium and Tesseract.
///
/// # Errors
/// - [`Pdf2TextError::EmptyInput`] if `bytes` is empty
/// - [`Pdf2TextError::PdfiumBindingFailed`] if no pdfium library is found
/// - [`Pdf2TextError::DocumentOpen`] if pdfium cannot parse `bytes`
/// - any page-level pdfium or OCR failure
pub fn extract_from_bytes(
    bytes: &[u8],
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, Pdf2TextError> {
    if bytes.is_empty() {
        return Err(Pdf2TextError::EmptyInput);
    }

    let pdfium = document::bind_pdfium(config.pdfium_library.as_deref())?;
    let document = document::open_document(&pdfium, bytes)?;
    let ocr = TesseractCli::from_config(config);

    extract_document(&document, config, &ocr)
}

/// Extract every page of an opened document with the given OCR engine.
pub fn extract_document<D, O>(
    document: &D,
    config: &ExtractionConfig,
    ocr: &O,
) -> Result<ExtractionOutput, Pdf2TextError>
where
    D: PdfDocumentSource + ?Sized,
    O: OcrEngine + ?Sized,
{
    let start = Instant::now();
    let total_pages = document.page_count();
    let mut stats = ExtractionStats::new(total_pages);
    let mut pages = Vec::with_capacity(total_pages);

    if let Some(ref cb) = config.progress_callback {
        cb.on_extraction_start(total_pages);
    }

    for index in 0..total_pages {
        if let Some(ref cb) = config.progress_callback {
            cb.on_page_start(index + 1, total_pages);
        }

        let outcome = page::extract_page(document, index, config, ocr)?;
        stats.record(outcome.resolution);

        if let Some(ref cb) = config.progress_callback {
            cb.on_page_complete(
                outcome.record.page_number,
                total_pages,
                outcome.record.source,
                outcome.record.chars,
            );
        }
        pages.push(outcome.record);
    }

    debug_assert_eq!(stats.recorded(), stats.total_pages);
    info!(
        "Extraction complete: {} pages ({} text layer, {} OCR, {} empty) in {}ms",
        stats.total_pages,
        stats.text_layer_pages,
        stats.ocr_pages,
        stats.empty_pages,
        start.elapsed().as_millis()
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_extraction_complete(total_pages, stats.empty_pages);
    }

    Ok(ExtractionOutput { pages, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn empty_stream_reports_without_pdfium() {
        let config = ExtractionConfig::default();
        let report = run(Cursor::new(Vec::<u8>::new()), &config).unwrap();
        assert_eq!(report.exit_code(), 2);
        assert_eq!(
            report.to_json(false).unwrap(),
            r#"{"error":"No PDF bytes received on stdin"}"#
        );
    }

    #[test]
    fn empty_slice_is_rejected_before_binding() {
        let config = ExtractionConfig::builder()
            .pdfium_library("/nonexistent/libpdfium.so")
            .build()
            .unwrap();
        let err = extract_from_bytes(&[], &config).unwrap_err();
        assert!(matches!(err, Pdf2TextError::EmptyInput));
    }
}
