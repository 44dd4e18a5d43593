//! Chunk Combination
//!
//! Merges per-chunk analyses into one document-level analysis. Ordering
//! follows the original chunk order throughout so the combined result reads
//! front to back like the document.

use std::collections::HashSet;

use crate::constants::excerpts::MIN_DISCLAIMER_CHARS;
use crate::pipeline::fallback::fallback_analysis;
use crate::types::{AnalysisResult, LanguageCode};

/// Merge chunk analyses into a single [`AnalysisResult`].
///
/// Zero chunks resolve through the fallback analyzer; one chunk passes
/// through unchanged. With several chunks, summaries are concatenated,
/// clauses flattened in chunk order, questions deduplicated keeping first
/// occurrences, and the first substantial disclaimer wins.
pub fn combine_analyses(
    mut results: Vec<AnalysisResult>,
    language: &LanguageCode,
) -> AnalysisResult {
    if results.is_empty() {
        return fallback_analysis("No chunks could be analyzed", "document", language);
    }

    if results.len() == 1 {
        return results.remove(0);
    }

    let summary_en = join_summaries(results.iter().map(|r| r.summary_en.as_str()))
        .unwrap_or_else(|| "Document analysis completed across multiple sections.".to_string());
    let summary_local = join_summaries(results.iter().map(|r| r.summary_local.as_str()))
        .unwrap_or_else(|| {
            if language.is_hindi() {
                "दस्तावेज़ का विश्लेषण कई खंडों में पूरा हो गया है।".to_string()
            } else {
                "Document analysis completed across multiple sections.".to_string()
            }
        });

    let disclaimer = results
        .iter()
        .map(|r| &r.disclaimer)
        .find(|d| d.chars().count() > MIN_DISCLAIMER_CHARS)
        .cloned()
        .unwrap_or_else(|| results[0].disclaimer.clone());

    let mut seen = HashSet::new();
    let mut recommended_questions = Vec::new();
    let mut clauses = Vec::new();

    for result in results {
        clauses.extend(result.clauses);
        for question in result.recommended_questions {
            if seen.insert(question.clone()) {
                recommended_questions.push(question);
            }
        }
    }

    AnalysisResult {
        summary_en,
        summary_local,
        clauses,
        recommended_questions,
        disclaimer,
    }
}

/// Space-join the non-empty summaries; `None` when every one is blank.
fn join_summaries<'a>(summaries: impl Iterator<Item = &'a str>) -> Option<String> {
    let joined = summaries
        .filter(|s| !s.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if joined.is_empty() { None } else { Some(joined) }
}
