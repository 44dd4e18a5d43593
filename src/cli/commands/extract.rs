//! Extract Command
//!
//! Runs the intake and extraction stage only and prints the result.
//! Unlike `analyze`, errors here surface directly instead of falling back,
//! which makes this the tool for diagnosing intake problems.

use std::path::Path;

use crate::extract::{self, ExtractedContent};
use crate::types::Result;

pub fn run(file: &Path) -> Result<()> {
    let (bytes, media_type) = extract::read_file(file)?;

    match extract::extract(&bytes, media_type)? {
        ExtractedContent::Text(text) => println!("{}", text),
        ExtractedContent::Image {
            media_type,
            data_base64,
        } => {
            // No local OCR: image content is only readable by the model
            println!(
                "Image payload ({}, {} base64 chars). Text extraction requires \
                 the vision path; run 'legalease analyze' instead.",
                media_type,
                data_base64.len()
            );
        }
    }

    Ok(())
}
