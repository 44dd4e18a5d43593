//! DOCX text extraction.
//!
//! A .docx file is a zip archive; the document body lives in
//! `word/document.xml`. Paragraph text sits in `w:t` elements, so a single
//! streaming pass collects those and drops all formatting.

use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::Event;
use zip::ZipArchive;

use crate::types::{LegalEaseError, Result};

/// Extract raw paragraph text from a DOCX byte buffer.
///
/// Paragraph boundaries become newlines; tabs and line breaks inside a
/// paragraph become single spaces. Formatting, tables' cell structure, and
/// embedded media are discarded.
pub fn extract_text(bytes: &[u8]) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| LegalEaseError::Extraction(format!("Not a valid DOCX archive: {}", e)))?;

    let mut document_xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| LegalEaseError::Extraction(format!("DOCX has no document body: {}", e)))?
        .read_to_string(&mut document_xml)
        .map_err(|e| LegalEaseError::Extraction(format!("Failed to read DOCX body: {}", e)))?;

    collect_paragraph_text(&document_xml)
}

fn collect_paragraph_text(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) => {
                if e.name().as_ref() == b"w:t" {
                    in_text_run = true;
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                // Paragraph end becomes a line break
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:br" | b"w:tab" => text.push(' '),
                _ => {}
            },
            Ok(Event::Text(t)) => {
                if in_text_run {
                    let run = t
                        .unescape()
                        .map_err(|e| {
                            LegalEaseError::Extraction(format!("Malformed DOCX XML: {}", e))
                        })?
                        .into_owned();
                    text.push_str(&run);
                }
            }
            Ok(_) => {}
            Err(e) => {
                return Err(LegalEaseError::Extraction(format!(
                    "Malformed DOCX XML: {}",
                    e
                )));
            }
        }
        buf.clear();
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn docx_with_body(body_xml: &str) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/document.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(body_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_extracts_paragraph_text() {
        let bytes = docx_with_body(
            "<w:document><w:body>\
             <w:p><w:r><w:t>First paragraph.</w:t></w:r></w:p>\
             <w:p><w:r><w:t>Second</w:t></w:r><w:r><w:t> paragraph.</w:t></w:r></w:p>\
             </w:body></w:document>",
        );

        let text = extract_text(&bytes).unwrap();
        assert_eq!(text, "First paragraph.\nSecond paragraph.\n");
    }

    #[test]
    fn test_ignores_text_outside_runs() {
        let bytes = docx_with_body(
            "<w:document><w:body>\
             <w:p><w:pPr>style-noise</w:pPr><w:r><w:t>Kept.</w:t></w:r></w:p>\
             </w:body></w:document>",
        );

        let text = extract_text(&bytes).unwrap();
        assert_eq!(text, "Kept.\n");
    }

    #[test]
    fn test_unescapes_entities() {
        let bytes = docx_with_body(
            "<w:document><w:body>\
             <w:p><w:r><w:t>Rent &amp; deposit</w:t></w:r></w:p>\
             </w:body></w:document>",
        );

        let text = extract_text(&bytes).unwrap();
        assert_eq!(text, "Rent & deposit\n");
    }

    #[test]
    fn test_rejects_non_zip_bytes() {
        let result = extract_text(b"plain text, not a zip");
        assert!(matches!(result, Err(LegalEaseError::Extraction(_))));
    }

    #[test]
    fn test_rejects_zip_without_document() {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("unrelated.txt", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"nothing here").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let result = extract_text(&bytes);
        assert!(matches!(result, Err(LegalEaseError::Extraction(_))));
    }
}
