//! PDF text extraction.
//!
//! Pure-Rust extraction from in-memory bytes. No OCR: scanned or image-only
//! PDFs yield empty text, which the caller turns into `NoTextExtracted`.

use crate::types::{LegalEaseError, Result};

/// Extract the text layer from a PDF byte buffer.
///
/// Extraction quality varies by PDF (text layer vs scanned images); the
/// result is raw and still needs whitespace normalization.
pub fn extract_text(bytes: &[u8]) -> Result<String> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| LegalEaseError::Extraction(format!("PDF extraction failed: {}", e)))
}
