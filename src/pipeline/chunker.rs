//! Document Chunking
//!
//! Splits long documents into windows the model can analyze independently.
//! Windows prefer to end at a sentence terminator or newline so clauses are
//! not cut mid-sentence, but a break point too far back is rejected to avoid
//! pathologically short chunks.

use crate::constants::chunking::{CHUNK_CHARS, MIN_BREAK_FRACTION};

/// Split `text` into analysis chunks.
///
/// Texts of at most [`CHUNK_CHARS`] characters come back as a single
/// untouched chunk. Longer texts are cut into windows of at most
/// [`CHUNK_CHARS`] characters; each window is trimmed and empty windows are
/// dropped, so concatenating the chunks reproduces the input up to boundary
/// whitespace.
pub fn split_text(text: &str) -> Vec<String> {
    // Char-index table so window arithmetic counts characters, not bytes
    let byte_of: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    let char_count = byte_of.len();

    if char_count <= CHUNK_CHARS {
        return vec![text.to_string()];
    }

    let offset = |ci: usize| {
        if ci >= char_count {
            text.len()
        } else {
            byte_of[ci]
        }
    };
    let min_break = (CHUNK_CHARS as f64 * MIN_BREAK_FRACTION) as usize;

    let mut chunks = Vec::new();
    let mut start = 0;

    while start < char_count {
        let mut end = start + CHUNK_CHARS;

        if end < char_count
            && let Some(break_point) = last_break_before(text, &byte_of, start, end)
            && break_point > start + min_break
        {
            end = break_point + 1;
        }

        let chunk = text[offset(start)..offset(end.min(char_count))].trim();
        if !chunk.is_empty() {
            chunks.push(chunk.to_string());
        }

        start = end;
    }

    chunks
}

/// Char index of the last sentence terminator or newline in
/// `text[start..=end]`, if any.
fn last_break_before(text: &str, byte_of: &[usize], start: usize, end: usize) -> Option<usize> {
    let end_byte = match byte_of.get(end + 1) {
        Some(&b) => b,
        None => text.len(),
    };
    let window = &text[byte_of[start]..end_byte];
    let byte_in_window = window.rfind(['.', '\n'])?;
    Some(start + window[..byte_in_window].chars().count())
}
