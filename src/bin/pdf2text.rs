//! CLI binary for edgequake-pdf2text.
//!
//! A thin shim over the library crate: PDF bytes on stdin, one JSON value on
//! stdout. Logs and the progress bar go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use edgequake_pdf2text::config::{
    ENV_NO_PROGRESS, ENV_OCR_DPI, ENV_OCR_LANGS, ENV_PDFIUM_LIB_PATH, ENV_PRETTY, ENV_QUIET,
    ENV_TESSERACT_CMD, ENV_USE_OCR_FALLBACK, ENV_VERBOSE,
};
use edgequake_pdf2text::{run, ExtractionConfig, ExtractionProgressCallback, PageSource, ProgressCallback};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Progress bar on stderr. indicatif hides it when stderr is not a terminal.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    /// Nothing is drawn until the document has been opened.
    fn new() -> Arc<Self> {
        Arc::new(Self {
            bar: ProgressBar::new(0),
        })
    }

    fn clear(&self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

impl ExtractionProgressCallback for CliProgressCallback {
    fn on_extraction_start(&self, total_pages: usize) {
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}/{len} pages  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");
        self.bar.set_length(total_pages as u64);
        self.bar.set_style(style);
        self.bar.set_prefix("Extracting");
        self.bar.enable_steady_tick(Duration::from_millis(80));
    }

    fn on_page_start(&self, page_num: usize, _total_pages: usize) {
        self.bar.set_message(format!("page {page_num}"));
    }

    fn on_ocr_fallback(&self, page_num: usize, _total_pages: usize) {
        self.bar.set_message(format!("page {page_num} (OCR)"));
    }

    fn on_page_complete(&self, _page_num: usize, _total: usize, _source: PageSource, _chars: usize) {
        self.bar.inc(1);
    }

    fn on_extraction_complete(&self, _total_pages: usize, _empty_pages: usize) {
        self.clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Text layer with Gujarati + Hindi OCR fallback
  pdf2text < scan.pdf > scan.json

  # Text layer only
  USE_OCR_FALLBACK=0 pdf2text < report.pdf

  # English OCR at 200 DPI, indented output
  pdf2text --langs eng --dpi 200 --pretty < scan.pdf

OUTPUT:
  {"pages": [{"page_number": 1, "text": "...", "source": "text-layer"|"ocr", "chars": N}, ...],
   "stats": {"totalPages": N, "textLayerPages": N, "ocrPages": N, "emptyPages": N}}
  On empty input or an unreadable PDF: {"error": "..."} and exit status 2.

ENVIRONMENT VARIABLES:
  USE_OCR_FALLBACK   "1" enables OCR fallback (default "1")
  OCR_LANGS          Tesseract languages, '+'-joined (default "guj+hin")
  OCR_DPI            Render resolution for OCR (default 300)
  TESSERACT_CMD      Tesseract executable (default "tesseract")
  PDFIUM_LIB_PATH    Path to an existing libpdfium
  RUST_LOG           Log filter, e.g. "edgequake_pdf2text=debug"
"#;

/// Extract per-page PDF text to JSON, with OCR fallback.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2text",
    version,
    about = "Extract per-page text from a PDF on stdin as JSON, with Tesseract OCR fallback",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// OCR fallback switch: "1" enables, anything else disables.
    #[arg(long, env = ENV_USE_OCR_FALLBACK, value_name = "FLAG")]
    ocr_fallback: Option<String>,

    /// Tesseract language set, '+'-joined (e.g. guj+hin).
    #[arg(long, env = ENV_OCR_LANGS)]
    langs: Option<String>,

    /// Render DPI for OCR.
    #[arg(long, env = ENV_OCR_DPI)]
    dpi: Option<String>,

    /// Tesseract executable.
    #[arg(long, env = ENV_TESSERACT_CMD)]
    tesseract: Option<PathBuf>,

    /// Path to an existing pdfium shared library.
    #[arg(long, env = ENV_PDFIUM_LIB_PATH)]
    pdfium_lib: Option<PathBuf>,

    /// Indent the JSON output.
    #[arg(long, env = ENV_PRETTY)]
    pretty: bool,

    /// Disable the progress bar.
    #[arg(long, env = ENV_NO_PROGRESS)]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = ENV_VERBOSE)]
    verbose: bool,

    /// Suppress all logs except errors.
    #[arg(short, long, env = ENV_QUIET)]
    quiet: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let show_progress = !cli.quiet && !cli.no_progress && !cli.verbose;
    let progress = show_progress.then(CliProgressCallback::new);
    let progress_cb = progress.clone().map(|cb| cb as ProgressCallback);
    let config = build_config(&cli, progress_cb)?;

    // ── Run extraction ───────────────────────────────────────────────────
    let result = run(io::stdin().lock(), &config);
    if let Some(ref cb) = progress {
        // A failed run never reaches on_extraction_complete.
        cb.clear();
    }
    let report = result.context("Extraction failed")?;

    let json = report.to_json(cli.pretty).context("Failed to serialise report")?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{json}").context("Failed to write to stdout")?;
    handle.flush().context("Failed to write to stdout")?;

    Ok(ExitCode::from(report.exit_code()))
}

/// Map CLI args (already merged with the environment by clap) to `ExtractionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ExtractionConfig> {
    let path_string = |p: &Option<PathBuf>| p.as_ref().map(|p| p.to_string_lossy().into_owned());
    let tesseract = path_string(&cli.tesseract);
    let pdfium_lib = path_string(&cli.pdfium_lib);

    let mut config = ExtractionConfig::from_lookup(|key| match key {
        ENV_USE_OCR_FALLBACK => cli.ocr_fallback.clone(),
        ENV_OCR_LANGS => cli.langs.clone(),
        ENV_OCR_DPI => cli.dpi.clone(),
        ENV_TESSERACT_CMD => tesseract.clone(),
        ENV_PDFIUM_LIB_PATH => pdfium_lib.clone(),
        _ => None,
    })
    .context("Invalid configuration")?;

    config.progress_callback = progress;
    Ok(config)
}
