//! Output types: per-page records, aggregate statistics and the final report.
//!
//! Internal code only ever deals with the typed values here. The JSON shape
//! (`{"pages": [...], "stats": {...}}` or `{"error": "..."}`) is produced at
//! the boundary by [`Report`]'s `Serialize` implementation.

use crate::error::Pdf2TextError;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Where a page's final text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageSource {
    /// The embedded PDF text layer.
    #[serde(rename = "text-layer")]
    TextLayer,
    /// OCR over a rasterised render of the page.
    #[serde(rename = "ocr")]
    Ocr,
}

impl PageSource {
    pub fn as_str(self) -> &'static str {
        match self {
            PageSource::TextLayer => "text-layer",
            PageSource::Ocr => "ocr",
        }
    }
}

/// Terminal state of one page, used for aggregation.
///
/// Differs from [`PageSource`]: an OCR'd page whose text is still blank is
/// recorded with source `ocr` but resolves to [`PageResolution::Empty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageResolution {
    TextLayer,
    Ocr,
    Empty,
}

/// One page of output, in page order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// 1-indexed page number.
    pub page_number: usize,
    /// Normalized text.
    pub text: String,
    pub source: PageSource,
    /// Number of Unicode scalar values in `text`.
    pub chars: usize,
}

impl PageRecord {
    pub fn new(page_number: usize, text: String, source: PageSource) -> Self {
        let chars = text.chars().count();
        Self {
            page_number,
            text,
            source,
            chars,
        }
    }
}

/// Aggregate statistics for a run.
///
/// `text_layer_pages + ocr_pages + empty_pages == total_pages` holds once
/// every page has been recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionStats {
    pub total_pages: usize,
    pub text_layer_pages: usize,
    pub ocr_pages: usize,
    pub empty_pages: usize,
}

impl ExtractionStats {
    pub fn new(total_pages: usize) -> Self {
        Self {
            total_pages,
            ..Self::default()
        }
    }

    /// Count one page under exactly one bucket.
    pub fn record(&mut self, resolution: PageResolution) {
        match resolution {
            PageResolution::TextLayer => self.text_layer_pages += 1,
            PageResolution::Ocr => self.ocr_pages += 1,
            PageResolution::Empty => self.empty_pages += 1,
        }
    }

    /// Number of pages counted so far.
    pub fn recorded(&self) -> usize {
        self.text_layer_pages + self.ocr_pages + self.empty_pages
    }
}

/// The successful result of an extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionOutput {
    pub pages: Vec<PageRecord>,
    pub stats: ExtractionStats,
}

/// What the process reports on stdout.
#[derive(Debug)]
pub enum Report {
    Success(ExtractionOutput),
    /// One of the user-visible input failures (see [`Pdf2TextError::is_input_failure`]).
    Failure(Pdf2TextError),
}

impl Report {
    /// Split a run result into a report and the errors that must abort instead.
    pub fn from_result(result: Result<ExtractionOutput, Pdf2TextError>) -> Result<Self, Pdf2TextError> {
        match result {
            Ok(output) => Ok(Report::Success(output)),
            Err(e) if e.is_input_failure() => Ok(Report::Failure(e)),
            Err(e) => Err(e),
        }
    }

    /// Process exit status for this report.
    pub fn exit_code(&self) -> u8 {
        match self {
            Report::Success(_) => 0,
            Report::Failure(_) => 2,
        }
    }

    /// Serialize to a single JSON value, without a trailing newline.
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Report::Success(output) => output.serialize(serializer),
            Report::Failure(err) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", &err.to_string())?;
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn page_record_counts_scalar_values() {
        let rec = PageRecord::new(1, "ગુજરાતી".to_string(), PageSource::Ocr);
        assert_eq!(rec.chars, "ગુજરાતી".chars().count());
        assert_ne!(rec.chars, "ગુજરાતી".len());
    }

    #[test]
    fn stats_serialize_camel_case() {
        let mut stats = ExtractionStats::new(3);
        stats.record(PageResolution::TextLayer);
        stats.record(PageResolution::Ocr);
        stats.record(PageResolution::Empty);
        assert_eq!(stats.recorded(), stats.total_pages);
        assert_eq!(
            serde_json::to_value(stats).unwrap(),
            json!({"totalPages": 3, "textLayerPages": 1, "ocrPages": 1, "emptyPages": 1})
        );
    }

    #[test]
    fn success_report_shape() {
        let report = Report::Success(ExtractionOutput {
            pages: vec![PageRecord::new(1, "hi".into(), PageSource::TextLayer)],
            stats: ExtractionStats {
                total_pages: 1,
                text_layer_pages: 1,
                ocr_pages: 0,
                empty_pages: 0,
            },
        });
        let v: Value = serde_json::from_str(&report.to_json(false).unwrap()).unwrap();
        assert_eq!(
            v,
            json!({
                "pages": [{"page_number": 1, "text": "hi", "source": "text-layer", "chars": 2}],
                "stats": {"totalPages": 1, "textLayerPages": 1, "ocrPages": 0, "emptyPages": 0}
            })
        );
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn failure_report_shape() {
        let report = Report::Failure(Pdf2TextError::EmptyInput);
        assert_eq!(
            report.to_json(false).unwrap(),
            r#"{"error":"No PDF bytes received on stdin"}"#
        );
        assert_eq!(report.exit_code(), 2);
    }

    #[test]
    fn non_ascii_is_not_escaped() {
        let report = Report::Success(ExtractionOutput {
            pages: vec![PageRecord::new(1, "नमस्ते".into(), PageSource::Ocr)],
            stats: ExtractionStats::new(1),
        });
        let json = report.to_json(false).unwrap();
        assert!(json.contains("नमस्ते"), "got: {json}");
        assert!(!json.contains("\\u"));
    }

    #[test]
    fn from_result_keeps_unhandled_errors() {
        let err = Pdf2TextError::RasterisationFailed {
            page: 2,
            detail: "bitmap".into(),
        };
        assert!(Report::from_result(Err(err)).is_err());

        let open = Pdf2TextError::DocumentOpen { detail: "bad xref".into() };
        let report = Report::from_result(Err(open)).unwrap();
        assert_eq!(report.exit_code(), 2);
    }
}
