//! Document Intake & Text Extraction
//!
//! Turns an uploaded file (bytes + declared media type) into either plain
//! text or an opaque image payload for the vision path. Text is sanitized
//! here, once, so every downstream consumer sees whitespace-clean content.
//!
//! Images are passed through base64-encoded; OCR is delegated entirely to
//! the remote model's vision capability.

mod docx;
mod pdf;

use base64::Engine;
use tracing::debug;

use crate::constants::intake;
use crate::types::{LegalEaseError, Result, clean_text};

// =============================================================================
// Media Types
// =============================================================================

/// Accepted upload media types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Pdf,
    Docx,
    Jpeg,
    Png,
    Gif,
    Webp,
}

impl MediaType {
    /// Resolve a declared MIME type. Unknown types are the caller's
    /// `UnsupportedFileType` rejection.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "application/pdf" => Some(Self::Pdf),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(Self::Docx)
            }
            "image/jpeg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/gif" => Some(Self::Gif),
            "image/webp" => Some(Self::Webp),
            _ => None,
        }
    }

    /// Resolve from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::Webp),
            _ => None,
        }
    }

    /// Resolve from a file path's extension.
    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    pub fn mime(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mime())
    }
}

// =============================================================================
// Extracted Content
// =============================================================================

/// Result of intake: sanitized text, or an encoded image for the vision path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedContent {
    Text(String),
    Image {
        media_type: MediaType,
        data_base64: String,
    },
}

// =============================================================================
// Extraction
// =============================================================================

/// Extract content from an uploaded byte buffer.
///
/// Enforces the size cap, dispatches on media type, sanitizes text, and
/// rejects empty extractions. Images are exempt from the empty-text check
/// since their payload is the content.
pub fn extract(bytes: &[u8], media_type: MediaType) -> Result<ExtractedContent> {
    validate_size(bytes.len() as u64)?;

    let raw = match media_type {
        MediaType::Pdf => pdf::extract_text(bytes)?,
        MediaType::Docx => docx::extract_text(bytes)?,
        MediaType::Jpeg | MediaType::Png | MediaType::Gif | MediaType::Webp => {
            let data = base64::engine::general_purpose::STANDARD.encode(bytes);
            debug!(
                "Encoded {} image ({} bytes) for vision analysis",
                media_type,
                bytes.len()
            );
            return Ok(ExtractedContent::Image {
                media_type,
                data_base64: data,
            });
        }
    };

    let text = clean_text(&raw);
    if text.is_empty() {
        return Err(LegalEaseError::NoTextExtracted);
    }

    debug!("Extracted {} characters from {}", text.chars().count(), media_type);
    Ok(ExtractedContent::Text(text))
}

/// Reject buffers over the accepted upload size.
pub fn validate_size(size: u64) -> Result<()> {
    if size > intake::MAX_FILE_SIZE {
        return Err(LegalEaseError::FileTooLarge {
            size,
            limit: intake::MAX_FILE_SIZE,
        });
    }
    Ok(())
}

/// Read a file through the intake gates: size cap first, then media type
/// from the extension. The bytes are read only after both checks pass.
pub fn read_file(path: &std::path::Path) -> Result<(Vec<u8>, MediaType)> {
    let metadata = std::fs::metadata(path)?;
    validate_size(metadata.len())?;

    let media_type =
        MediaType::from_path(path).ok_or_else(|| LegalEaseError::UnsupportedFileType {
            media_type: path
                .extension()
                .map(|e| e.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })?;

    let bytes = std::fs::read(path)?;
    Ok((bytes, media_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_from_mime() {
        assert_eq!(MediaType::from_mime("application/pdf"), Some(MediaType::Pdf));
        assert_eq!(MediaType::from_mime("image/webp"), Some(MediaType::Webp));
        assert_eq!(MediaType::from_mime("text/plain"), None);
        assert_eq!(MediaType::from_mime("application/msword"), None);
    }

    #[test]
    fn test_media_type_from_extension() {
        assert_eq!(MediaType::from_extension("PDF"), Some(MediaType::Pdf));
        assert_eq!(MediaType::from_extension("jpeg"), Some(MediaType::Jpeg));
        assert_eq!(MediaType::from_extension("jpg"), Some(MediaType::Jpeg));
        assert_eq!(MediaType::from_extension("txt"), None);
    }

    #[test]
    fn test_media_type_from_path() {
        use std::path::Path;
        assert_eq!(
            MediaType::from_path(Path::new("dir/lease.docx")),
            Some(MediaType::Docx)
        );
        assert_eq!(MediaType::from_path(Path::new("no_extension")), None);
    }

    #[test]
    fn test_validate_size() {
        assert!(validate_size(10).is_ok());
        assert!(validate_size(intake::MAX_FILE_SIZE).is_ok());

        let err = validate_size(intake::MAX_FILE_SIZE + 1).unwrap_err();
        assert!(matches!(err, LegalEaseError::FileTooLarge { .. }));
    }

    #[test]
    fn test_extract_rejects_oversized_buffer() {
        // Don't allocate 10MB; the size gate sees the length before dispatch
        let err = validate_size(20 * 1024 * 1024).unwrap_err();
        assert!(matches!(
            err,
            LegalEaseError::FileTooLarge { size, .. } if size == 20 * 1024 * 1024
        ));
    }

    #[test]
    fn test_extract_image_passthrough() {
        let bytes = b"\x89PNG\r\n\x1a\nfakepixels";
        let content = extract(bytes, MediaType::Png).unwrap();

        match &content {
            ExtractedContent::Image {
                media_type,
                data_base64,
            } => {
                assert_eq!(*media_type, MediaType::Png);
                let decoded = base64::engine::general_purpose::STANDARD
                    .decode(data_base64)
                    .unwrap();
                assert_eq!(decoded, bytes);
            }
            ExtractedContent::Text(_) => panic!("expected image variant"),
        }
    }

    #[test]
    fn test_extract_docx_yields_cleaned_text() {
        use std::io::{Cursor, Write};
        use zip::ZipWriter;
        use zip::write::SimpleFileOptions;

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/document.xml", SimpleFileOptions::default())
            .unwrap();
        writer
            .write_all(
                b"<w:document><w:body>\
                  <w:p><w:r><w:t>Terms  of </w:t></w:r><w:r><w:t>lease.</w:t></w:r></w:p>\
                  </w:body></w:document>",
            )
            .unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let content = extract(&bytes, MediaType::Docx).unwrap();
        assert_eq!(content, ExtractedContent::Text("Terms of lease.".to_string()));
    }

    #[test]
    fn test_extract_garbage_pdf_is_extraction_error() {
        let err = extract(b"not a pdf", MediaType::Pdf).unwrap_err();
        assert!(matches!(err, LegalEaseError::Extraction(_)));
    }

    #[test]
    fn test_read_file_resolves_type_from_extension() {
        use std::io::Write;

        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(b"pixels").unwrap();

        let (bytes, media_type) = read_file(file.path()).unwrap();
        assert_eq!(bytes, b"pixels");
        assert_eq!(media_type, MediaType::Png);
    }

    #[test]
    fn test_read_file_rejects_unknown_extension() {
        use std::io::Write;

        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(b"plain text").unwrap();

        let err = read_file(file.path()).unwrap_err();
        assert!(matches!(
            err,
            LegalEaseError::UnsupportedFileType { ref media_type } if media_type == "txt"
        ));
    }

    #[test]
    fn test_read_file_missing_path() {
        let err = read_file(std::path::Path::new("/no/such/file.pdf")).unwrap_err();
        assert!(matches!(err, LegalEaseError::Io(_)));
    }
}
