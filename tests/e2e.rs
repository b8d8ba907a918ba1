//! End-to-end tests for the `pdf2text` binary against a real pdfium.
//!
//! The PDFs are generated in memory, so no fixtures are needed. The tests are
//! gated behind `E2E_ENABLED` because they need a pdfium shared library
//! (`PDFIUM_LIB_PATH`, the working directory or the system path). The OCR
//! test additionally needs `tesseract` with English language data.
//!
//! Run with:
//!   E2E_ENABLED=1 PDFIUM_LIB_PATH=/path/to/libpdfium.so cargo test --test e2e -- --nocapture

use serde_json::Value;
use std::io::Write;
use std::process::{Command, Stdio};

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Skip this test if E2E_ENABLED is not set.
macro_rules! e2e_skip_unless_ready {
    () => {{
        if std::env::var("E2E_ENABLED").is_err() {
            println!("SKIP — set E2E_ENABLED=1 to run e2e tests");
            return;
        }
    }};
}

/// Build a single-file PDF with one US-Letter page per entry. `Some(text)`
/// draws `text` in Helvetica; `None` leaves the page blank.
fn build_pdf(pages: &[Option<&str>]) -> Vec<u8> {
    let page_count = pages.len();
    let first_page_obj = 4;
    let kids: Vec<String> = (0..page_count)
        .map(|i| format!("{} 0 R", first_page_obj + 2 * i))
        .collect();

    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            page_count
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    ];
    for (i, text) in pages.iter().enumerate() {
        let content_obj = first_page_obj + 2 * i + 1;
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {content_obj} 0 R >>"
        ));
        let stream = match text {
            Some(t) => format!("BT /F1 24 Tf 72 700 Td ({t}) Tj ET"),
            None => String::new(),
        };
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            stream.len(),
            stream
        ));
    }

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }
    let xref_at = pdf.len();
    pdf.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    pdf.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        pdf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    pdf.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_at
        )
        .as_bytes(),
    );
    pdf
}

fn run_pdf2text(stdin: &[u8], envs: &[(&str, &str)]) -> (Option<i32>, Value, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_pdf2text"))
        .arg("--no-progress")
        .env_remove("USE_OCR_FALLBACK")
        .env_remove("OCR_LANGS")
        .env_remove("OCR_DPI")
        .envs(envs.iter().copied())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn pdf2text");
    // The child may exit before reading stdin (e.g. on a config error).
    let _ = child.stdin.take().expect("stdin piped").write_all(stdin);
    let out = child.wait_with_output().expect("wait for pdf2text");
    let stderr = String::from_utf8_lossy(&out.stderr).into_owned();
    let json = serde_json::from_slice(&out.stdout)
        .unwrap_or_else(|e| panic!("stdout is not JSON ({e}); stderr: {stderr}"));
    (out.status.code(), json, stderr)
}

fn assert_report_invariants(json: &Value) {
    let stats = &json["stats"];
    let total = stats["totalPages"].as_u64().unwrap();
    assert_eq!(
        stats["textLayerPages"].as_u64().unwrap()
            + stats["ocrPages"].as_u64().unwrap()
            + stats["emptyPages"].as_u64().unwrap(),
        total
    );
    let pages = json["pages"].as_array().unwrap();
    assert_eq!(pages.len() as u64, total);
    for (k, page) in pages.iter().enumerate() {
        assert_eq!(page["page_number"].as_u64().unwrap(), k as u64 + 1);
        let text = page["text"].as_str().unwrap();
        assert_eq!(page["chars"].as_u64().unwrap(), text.chars().count() as u64);
        assert_eq!(text, text.trim());
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn test_garbage_input_reports_open_failure() {
    e2e_skip_unless_ready!();
    let (code, json, _) = run_pdf2text(b"this is not a pdf", &[]);
    assert_eq!(code, Some(2));
    let msg = json["error"].as_str().unwrap();
    assert!(msg.starts_with("Failed to open PDF"), "got: {msg}");
}

#[test]
fn test_text_layer_page() {
    e2e_skip_unless_ready!();
    let pdf = build_pdf(&[Some("Hello World")]);
    let (code, json, stderr) = run_pdf2text(&pdf, &[]);
    assert_eq!(code, Some(0), "stderr: {stderr}");
    assert_report_invariants(&json);

    let page = &json["pages"][0];
    assert_eq!(page["source"], "text-layer");
    assert!(page["text"].as_str().unwrap().contains("Hello World"));
    assert_eq!(json["stats"]["textLayerPages"], 1);
    assert_eq!(json["stats"]["ocrPages"], 0);
    assert_eq!(json["stats"]["emptyPages"], 0);
}

#[test]
fn test_blank_page_without_ocr() {
    e2e_skip_unless_ready!();
    let pdf = build_pdf(&[Some("Intro"), None]);
    let (code, json, stderr) = run_pdf2text(&pdf, &[("USE_OCR_FALLBACK", "0")]);
    assert_eq!(code, Some(0), "stderr: {stderr}");
    assert_report_invariants(&json);

    let blank = &json["pages"][1];
    assert_eq!(blank["source"], "text-layer");
    assert_eq!(blank["text"], "");
    assert_eq!(blank["chars"], 0);
    assert_eq!(json["stats"]["textLayerPages"], 1);
    assert_eq!(json["stats"]["emptyPages"], 1);
}

#[test]
fn test_blank_page_with_ocr() {
    e2e_skip_unless_ready!();
    if Command::new("tesseract").arg("--version").output().is_err() {
        println!("SKIP — tesseract not on PATH");
        return;
    }
    let pdf = build_pdf(&[None]);
    let (code, json, stderr) = run_pdf2text(
        &pdf,
        &[("USE_OCR_FALLBACK", "1"), ("OCR_LANGS", "eng"), ("OCR_DPI", "150")],
    );
    assert_eq!(code, Some(0), "stderr: {stderr}");
    assert_report_invariants(&json);

    let page = &json["pages"][0];
    assert_eq!(page["source"], "ocr");
    assert_eq!(page["text"], "");
    assert_eq!(json["stats"]["ocrPages"], 0);
    assert_eq!(json["stats"]["emptyPages"], 1);
}

#[test]
fn test_page_order_is_preserved() {
    e2e_skip_unless_ready!();
    let pdf = build_pdf(&[Some("Alpha"), Some("Bravo"), Some("Charlie")]);
    let (code, json, stderr) = run_pdf2text(&pdf, &[("USE_OCR_FALLBACK", "0")]);
    assert_eq!(code, Some(0), "stderr: {stderr}");
    assert_report_invariants(&json);

    let texts: Vec<&str> = json["pages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, ["Alpha", "Bravo", "Charlie"]);
}
