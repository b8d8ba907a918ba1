//! Input: read the whole PDF into memory.
//!
//! The PDF arrives as raw bytes on stdin. pdfium parses from a byte slice, so
//! the stream is read to completion before anything else happens. An empty
//! stream is rejected here, before pdfium is even bound.

use crate::error::Pdf2TextError;
use std::io::Read;
use tracing::debug;

/// Read every byte from `reader`, rejecting empty input.
pub fn read_input<R: Read>(mut reader: R) -> Result<Vec<u8>, Pdf2TextError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(Pdf2TextError::InputRead)?;

    if bytes.is_empty() {
        return Err(Pdf2TextError::EmptyInput);
    }

    debug!("Read {} input bytes", bytes.len());
    Ok(bytes)
}
