//! Configuration types for page text extraction.
//!
//! All extraction behaviour is controlled through [`ExtractionConfig`]. It is
//! built exactly once at startup, either from the process environment via
//! [`ExtractionConfig::from_env`] or through [`ExtractionConfig::builder`],
//! and then passed by reference into the extractor. Nothing below this module
//! reads environment variables.

use crate::error::Pdf2TextError;
use crate::progress::ProgressCallback;
use std::fmt;
use std::path::PathBuf;

/// Environment variable enabling OCR fallback (`"1"` enables).
pub const ENV_USE_OCR_FALLBACK: &str = "USE_OCR_FALLBACK";
/// Environment variable holding the `+`-joined Tesseract language set.
pub const ENV_OCR_LANGS: &str = "OCR_LANGS";
/// Environment variable holding the OCR render resolution.
pub const ENV_OCR_DPI: &str = "OCR_DPI";
/// Environment variable naming the Tesseract executable.
pub const ENV_TESSERACT_CMD: &str = "TESSERACT_CMD";
/// Environment variable pointing at an explicit pdfium shared library.
pub const ENV_PDFIUM_LIB_PATH: &str = "PDFIUM_LIB_PATH";

// Read by the `pdf2text` binary only.
pub const ENV_PRETTY: &str = "PDF2TEXT_PRETTY";
pub const ENV_VERBOSE: &str = "PDF2TEXT_VERBOSE";
pub const ENV_QUIET: &str = "PDF2TEXT_QUIET";
pub const ENV_NO_PROGRESS: &str = "PDF2TEXT_NO_PROGRESS";

/// Default Tesseract language set: Gujarati + Hindi.
pub const DEFAULT_OCR_LANGS: &str = "guj+hin";
/// Default OCR render resolution.
pub const DEFAULT_OCR_DPI: u32 = 300;
/// Default Tesseract executable, resolved through `PATH`.
pub const DEFAULT_TESSERACT_CMD: &str = "tesseract";

const MIN_OCR_DPI: u32 = 1;
const MAX_OCR_DPI: u32 = 1200;

/// Configuration for a single extraction run.
///
/// # Example
/// ```rust
/// use edgequake_pdf2text::ExtractionConfig;
///
/// let config = ExtractionConfig::builder()
///     .ocr_enabled(true)
///     .ocr_languages("eng+deu")
///     .ocr_dpi(200)
///     .build()
///     .unwrap();
/// assert_eq!(config.ocr_languages.to_string(), "eng+deu");
/// ```
#[derive(Clone)]
pub struct ExtractionConfig {
    /// Render and OCR pages whose text layer is not meaningful. Default: true.
    pub ocr_enabled: bool,

    /// Languages passed to the OCR engine. Default: `guj+hin`.
    pub ocr_languages: OcrLanguages,

    /// Resolution used when rasterising a page for OCR. Range: 1–1200. Default: 300.
    ///
    /// pdfium renders at 72 points per inch, so the page is scaled by
    /// `ocr_dpi / 72`.
    pub ocr_dpi: u32,

    /// Tesseract executable. Default: `tesseract` from `PATH`.
    pub tesseract_cmd: PathBuf,

    /// Explicit pdfium shared library. If None, the working directory and the
    /// system library path are searched.
    pub pdfium_library: Option<PathBuf>,

    /// Optional per-page progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            ocr_enabled: true,
            ocr_languages: OcrLanguages::default(),
            ocr_dpi: DEFAULT_OCR_DPI,
            tesseract_cmd: PathBuf::from(DEFAULT_TESSERACT_CMD),
            pdfium_library: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ExtractionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionConfig")
            .field("ocr_enabled", &self.ocr_enabled)
            .field("ocr_languages", &self.ocr_languages)
            .field("ocr_dpi", &self.ocr_dpi)
            .field("tesseract_cmd", &self.tesseract_cmd)
            .field("pdfium_library", &self.pdfium_library)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ExtractionProgressCallback>"),
            )
            .finish()
    }
}

impl ExtractionConfig {
    /// Create a new builder for `ExtractionConfig`.
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder {
            config: Self::default(),
        }
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, Pdf2TextError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary key lookup.
    ///
    /// | Variable | Effect | Default |
    /// |---|---|---|
    /// | `USE_OCR_FALLBACK` | `"1"` enables OCR fallback | `"1"` |
    /// | `OCR_LANGS` | `+`-joined language set | `guj+hin` |
    /// | `OCR_DPI` | render resolution | `300` |
    /// | `TESSERACT_CMD` | OCR executable | `tesseract` |
    /// | `PDFIUM_LIB_PATH` | pdfium library | unset |
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Pdf2TextError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(v) = lookup(ENV_USE_OCR_FALLBACK) {
            builder = builder.ocr_enabled(parse_ocr_flag(&v));
        }
        if let Some(v) = lookup(ENV_OCR_LANGS) {
            builder = builder.ocr_languages(v);
        }
        if let Some(v) = lookup(ENV_OCR_DPI) {
            builder = builder.ocr_dpi(parse_dpi(&v)?);
        }
        if let Some(v) = lookup(ENV_TESSERACT_CMD).filter(|v| !v.is_empty()) {
            builder = builder.tesseract_cmd(v);
        }
        if let Some(v) = lookup(ENV_PDFIUM_LIB_PATH).filter(|v| !v.is_empty()) {
            builder = builder.pdfium_library(v);
        }

        builder.build()
    }
}

/// `USE_OCR_FALLBACK` semantics: only the exact string `"1"` enables OCR.
pub fn parse_ocr_flag(value: &str) -> bool {
    value == "1"
}

/// Parse an `OCR_DPI` value.
pub fn parse_dpi(value: &str) -> Result<u32, Pdf2TextError> {
    value.trim().parse::<u32>().map_err(|e| {
        Pdf2TextError::InvalidConfig(format!("{ENV_OCR_DPI} must be a positive integer, got '{value}': {e}"))
    })
}

/// Builder for [`ExtractionConfig`].
#[derive(Debug)]
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl ExtractionConfigBuilder {
    pub fn ocr_enabled(mut self, enabled: bool) -> Self {
        self.config.ocr_enabled = enabled;
        self
    }

    pub fn ocr_languages(mut self, langs: impl AsRef<str>) -> Self {
        self.config.ocr_languages = OcrLanguages::parse(langs.as_ref());
        self
    }

    pub fn ocr_dpi(mut self, dpi: u32) -> Self {
        self.config.ocr_dpi = dpi;
        self
    }

    pub fn tesseract_cmd(mut self, cmd: impl Into<PathBuf>) -> Self {
        self.config.tesseract_cmd = cmd.into();
        self
    }

    pub fn pdfium_library(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.pdfium_library = Some(path.into());
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractionConfig, Pdf2TextError> {
        let dpi = self.config.ocr_dpi;
        if !(MIN_OCR_DPI..=MAX_OCR_DPI).contains(&dpi) {
            return Err(Pdf2TextError::InvalidConfig(format!(
                "OCR DPI must be {MIN_OCR_DPI}–{MAX_OCR_DPI}, got {dpi}"
            )));
        }
        if self.config.tesseract_cmd.as_os_str().is_empty() {
            return Err(Pdf2TextError::InvalidConfig(
                "Tesseract command must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}

// ── OCR languages ────────────────────────────────────────────────────────

/// Ordered, de-duplicated set of Tesseract language codes.
///
/// Tesseract combines languages with `+` (`guj+hin`); the first code is the
/// primary language, so insertion order is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrLanguages(Vec<String>);

impl OcrLanguages {
    /// Parse a `+`-joined language list. Blank input yields the default set.
    pub fn parse(s: &str) -> Self {
        let mut codes: Vec<String> = Vec::new();
        for code in s.split('+').map(str::trim).filter(|c| !c.is_empty()) {
            if !codes.iter().any(|c| c == code) {
                codes.push(code.to_string());
            }
        }
        if codes.is_empty() {
            return Self::default();
        }
        Self(codes)
    }
}

impl Default for OcrLanguages {
    fn default() -> Self {
        Self(DEFAULT_OCR_LANGS.split('+').map(String::from).collect())
    }
}

impl fmt::Display for OcrLanguages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("+"))
    }
}
