//! OCR: hand a rendered page to Tesseract and read back plain text.
//!
//! Tesseract is driven as an external process. The page is PNG-encoded in
//! memory and written to the engine's stdin (`tesseract stdin stdout ...`);
//! recognized text is read from its stdout. Nothing is written to disk.
//!
//! ## Modes
//!
//! Every call uses the LSTM engine (`--oem 1`). The page segmentation mode
//! varies: the first pass assumes a single uniform block of text
//! (`--psm 6`), which suits dense single-column scans; if that yields
//! nothing, the caller retries with fully automatic segmentation
//! (`--psm 3`), which copes with columns and sparse layouts.

use crate::config::{ExtractionConfig, OcrLanguages};
use crate::error::OcrError;
use crate::pipeline::encode;
use crate::pipeline::render::RasterImage;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// Tesseract OCR engine mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineMode {
    /// Neural-net LSTM engine only (`--oem 1`).
    LstmOnly,
}

impl EngineMode {
    pub fn oem(self) -> u8 {
        match self {
            EngineMode::LstmOnly => 1,
        }
    }
}

/// Tesseract page segmentation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentationMode {
    /// Fully automatic page segmentation, no OSD (`--psm 3`).
    Auto,
    /// Assume a single uniform block of text (`--psm 6`).
    SingleBlock,
}

impl SegmentationMode {
    pub fn psm(self) -> u8 {
        match self {
            SegmentationMode::Auto => 3,
            SegmentationMode::SingleBlock => 6,
        }
    }
}

/// Segmentation used for the first OCR pass.
pub const PRIMARY_SEGMENTATION: SegmentationMode = SegmentationMode::SingleBlock;
/// Segmentation used when the first pass yields no meaningful text.
pub const FALLBACK_SEGMENTATION: SegmentationMode = SegmentationMode::Auto;

/// Parameters for a single recognition call.
#[derive(Debug, Clone, Copy)]
pub struct OcrRequest<'a> {
    pub languages: &'a OcrLanguages,
    pub engine_mode: EngineMode,
    pub segmentation: SegmentationMode,
}

impl<'a> OcrRequest<'a> {
    pub fn new(languages: &'a OcrLanguages, segmentation: SegmentationMode) -> Self {
        Self {
            languages,
            engine_mode: EngineMode::LstmOnly,
            segmentation,
        }
    }
}

/// Anything that can turn a page image into text.
pub trait OcrEngine {
    /// Recognize text in `image`. The result is raw engine output.
    fn recognize(&self, image: &RasterImage, request: &OcrRequest<'_>) -> Result<String, OcrError>;
}

/// [`OcrEngine`] that runs the `tesseract` executable.
#[derive(Debug, Clone)]
pub struct TesseractCli {
    program: PathBuf,
}

impl TesseractCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(config.tesseract_cmd.clone())
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Command-line arguments for `request`; input and output are the
    /// standard streams.
    pub fn args(request: &OcrRequest<'_>) -> Vec<String> {
        vec![
            "stdin".to_string(),
            "stdout".to_string(),
            "-l".to_string(),
            request.languages.to_string(),
            "--oem".to_string(),
            request.engine_mode.oem().to_string(),
            "--psm".to_string(),
            request.segmentation.psm().to_string(),
        ]
    }
}

impl OcrEngine for TesseractCli {
    fn recognize(&self, image: &RasterImage, request: &OcrRequest<'_>) -> Result<String, OcrError> {
        let png = encode::encode_png(image)?;
        let args = Self::args(request);
        debug!("Running {} {}", self.program.display(), args.join(" "));

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| OcrError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(&png) {
                Ok(()) => {}
                // The engine exited before reading the image; its stderr says why.
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    warn!("OCR engine closed stdin early");
                }
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(OcrError::Pipe(e));
                }
            }
        }

        let output = child.wait_with_output().map_err(OcrError::Pipe)?;
        if !output.status.success() {
            return Err(OcrError::EngineFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
