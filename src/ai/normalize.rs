//! Response Normalization
//!
//! Coerces untrusted model output into the fixed analysis schema.
//!
//! Handles common model output issues:
//! - Markdown code fence wrapping (```json ... ```)
//! - Explanatory prose around the JSON object
//! - Missing or mistyped fields
//! - Out-of-range risk levels
//! - Stray whitespace and control characters in strings
//!
//! `normalize_analysis` never fails: when the response cannot be parsed at
//! all, a best-effort result is built from the raw text so the caller always
//! receives a structurally complete analysis.

use serde_json::Value;
use tracing::{debug, warn};

use crate::constants::excerpts;
use crate::types::utils::{ParseWithDefault, clean_text, excerpt, json_string};
use crate::types::{AnalysisResult, ChatResponse, Clause, LanguageCode, RiskLevel};

const DEFAULT_DISCLAIMER: &str =
    "This analysis is for informational purposes only and does not constitute legal advice.";

const FULL_DISCLAIMER: &str = "This analysis is for informational purposes only and does not \
     constitute legal advice. Please consult with a qualified legal professional for specific \
     legal matters.";

// =============================================================================
// Entry Points
// =============================================================================

/// Normalize a raw analysis response into a complete [`AnalysisResult`].
///
/// `original_text` is the document text the model was asked about; it only
/// feeds the generic clause excerpt on the parse-failure path and may be
/// empty (image analyses have no extracted text).
pub fn normalize_analysis(
    raw: &str,
    original_text: &str,
    language: &LanguageCode,
) -> AnalysisResult {
    let cleaned = clean_json_response(raw);

    match serde_json::from_str::<Value>(&cleaned) {
        Ok(value) => coerce_analysis(&value, language),
        Err(e) => {
            warn!("Analysis JSON parse failed ({}), building best-effort result", e);
            structured_from_text(&cleaned, original_text, language)
        }
    }
}

/// Normalize a raw chat response.
///
/// A response that fails to parse as the answer/evidence shape is returned
/// verbatim as the answer with no evidence.
pub fn normalize_chat_response(raw: &str) -> ChatResponse {
    let cleaned = clean_json_response(raw);

    match serde_json::from_str::<ChatResponse>(&cleaned) {
        Ok(response) => response,
        Err(_) => {
            debug!("Chat response was not structured JSON, returning plain answer");
            ChatResponse {
                answer: raw.trim().to_string(),
                evidence: Vec::new(),
            }
        }
    }
}

// =============================================================================
// JSON Extraction
// =============================================================================

/// Strip markdown fences and slice to the outermost JSON object.
///
/// The slice step defends against prose before or after the JSON; when no
/// brace pair exists the defenced text is returned unchanged.
pub fn clean_json_response(text: &str) -> String {
    let mut cleaned = text.replace("```json", "");
    cleaned = cleaned.trim().to_string();

    if let Some(stripped) = cleaned.strip_suffix("```") {
        cleaned = stripped.trim_end().to_string();
    }

    // Braces are ASCII, so byte indices from find/rfind are char boundaries
    if let (Some(first), Some(last)) = (cleaned.find('{'), cleaned.rfind('}'))
        && last > first
    {
        cleaned = cleaned[first..=last].to_string();
    }

    cleaned
}

// =============================================================================
// Field Coercion
// =============================================================================

/// Apply field-level coercion to parsed JSON of any shape.
///
/// Every field is validated independently: missing, empty, or mistyped
/// values collapse to their documented defaults, string content is
/// whitespace-cleaned, and risk levels are clamped to the known set.
fn coerce_analysis(value: &Value, language: &LanguageCode) -> AnalysisResult {
    let local_default = if language.is_hindi() {
        "हिंदी सारांश उपलब्ध नहीं है"
    } else {
        "No local summary available"
    };

    let clauses = match value.get("clauses").and_then(|v| v.as_array()) {
        Some(items) => items.iter().map(coerce_clause).collect(),
        None => Vec::new(),
    };

    AnalysisResult {
        summary_en: string_field_or(value, "summary_en", "No English summary available"),
        summary_local: string_field_or(value, "summary_local", local_default),
        clauses,
        recommended_questions: string_array_or(
            value,
            "recommended_questions",
            &["What are the main terms and conditions?"],
        ),
        disclaimer: string_field_or(value, "disclaimer", DEFAULT_DISCLAIMER),
    }
}

fn coerce_clause(value: &Value) -> Clause {
    let risk_level = RiskLevel::parse_or_default(
        json_string(value, "risk_level").as_deref().unwrap_or(""),
    );

    Clause {
        title: string_field_or(value, "title", "Untitled Clause"),
        source_excerpt: string_field_or(value, "source_excerpt", "No excerpt available"),
        explanation_en: string_field_or(value, "explanation_en", "No explanation available"),
        risk_level,
        risk_reasons: string_array_or(value, "risk_reasons", &["Risk assessment required"]),
        india_markers: string_array_or(value, "india_markers", &["general_legal"]),
    }
}

/// String field with whitespace cleanup; missing, non-string, and values
/// blank after cleanup all take the default.
fn string_field_or(value: &Value, key: &str, default: &str) -> String {
    json_string(value, key)
        .map(|s| clean_text(&s))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| clean_text(default))
}

/// String array with per-element cleanup. A present-but-empty array stays
/// empty; only a missing or non-array field takes the default list.
fn string_array_or(value: &Value, key: &str, default: &[&str]) -> Vec<String> {
    match value.get(key).and_then(|v| v.as_array()) {
        Some(items) => items
            .iter()
            .filter_map(|v| v.as_str())
            .map(clean_text)
            .collect(),
        None => default.iter().map(|s| s.to_string()).collect(),
    }
}

// =============================================================================
// Parse-failure Path
// =============================================================================

/// Best-effort result when the response is not JSON at all: the raw text
/// becomes a truncated summary plus one generic clause, so the never-fails
/// contract holds even for pure prose output.
fn structured_from_text(
    raw: &str,
    original_text: &str,
    language: &LanguageCode,
) -> AnalysisResult {
    let summary_local = if language.is_hindi() {
        "दस्तावेज़ का विश्लेषण पूरा हो गया है। कृपया विस्तृत जानकारी के लिए नीचे दिए गए खंडों को देखें।"
    } else {
        "Document analysis completed. Please review the sections below for detailed information."
    };

    AnalysisResult {
        summary_en: excerpt(raw, excerpts::SUMMARY_CHARS),
        summary_local: summary_local.to_string(),
        clauses: vec![
            Clause::new(
                "Document Analysis",
                excerpt(original_text, excerpts::SOURCE_CHARS),
                excerpt(raw, excerpts::EXPLANATION_CHARS),
                RiskLevel::Medium,
            )
            .with_reasons(&["Requires legal review", "Complex terms present"])
            .with_markers(&["general_legal", "document_analysis"]),
        ],
        recommended_questions: vec![
            "What are the main terms and conditions?".to_string(),
            "Are there any risky clauses I should be aware of?".to_string(),
            "How does this apply under Indian law?".to_string(),
            "What should I negotiate or clarify?".to_string(),
        ],
        disclaimer: FULL_DISCLAIMER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn en() -> LanguageCode {
        LanguageCode::new("en")
    }

    fn hi() -> LanguageCode {
        LanguageCode::new("hi")
    }

    #[test]
    fn test_clean_json_response_strips_fences() {
        let input = "```json\n{\"summary_en\": \"ok\"}\n```";
        assert_eq!(clean_json_response(input), "{\"summary_en\": \"ok\"}");
    }

    #[test]
    fn test_clean_json_response_slices_prose() {
        let input = "Here is the analysis:\n{\"a\": 1}\nHope this helps!";
        assert_eq!(clean_json_response(input), "{\"a\": 1}");
    }

    #[test]
    fn test_clean_json_response_no_braces() {
        assert_eq!(clean_json_response("  plain text  "), "plain text");
    }

    #[test]
    fn test_normalize_valid_response() {
        let raw = json!({
            "summary_en": "  A rental   agreement. ",
            "summary_local": "एक किराया अनुबंध।",
            "clauses": [{
                "title": "Security Deposit",
                "source_excerpt": "Deposit of Rs 50,000",
                "explanation_en": "Large upfront deposit.",
                "risk_level": "HIGH",
                "risk_reasons": ["Above market norm"],
                "india_markers": ["rental_agreement"]
            }],
            "recommended_questions": ["Is the deposit refundable?"],
            "disclaimer": "Informational only, consult a qualified legal professional for advice."
        })
        .to_string();

        let result = normalize_analysis(&raw, "full text", &en());

        assert_eq!(result.summary_en, "A rental agreement.");
        assert_eq!(result.summary_local, "एक किराया अनुबंध।");
        assert_eq!(result.clauses.len(), 1);
        assert_eq!(result.clauses[0].risk_level, RiskLevel::High);
        assert_eq!(result.recommended_questions, vec!["Is the deposit refundable?"]);
    }

    #[test]
    fn test_normalize_defaults_for_empty_object() {
        let result = normalize_analysis("{}", "", &en());

        assert_eq!(result.summary_en, "No English summary available");
        assert_eq!(result.summary_local, "No local summary available");
        assert!(result.clauses.is_empty());
        assert_eq!(
            result.recommended_questions,
            vec!["What are the main terms and conditions?"]
        );
        assert_eq!(result.disclaimer, DEFAULT_DISCLAIMER);
    }

    #[test]
    fn test_normalize_hindi_local_default() {
        let result = normalize_analysis("{}", "", &hi());
        assert_eq!(result.summary_local, "हिंदी सारांश उपलब्ध नहीं है");
    }

    #[test]
    fn test_clause_defaults() {
        let raw = json!({"clauses": [{}]}).to_string();
        let clause = &normalize_analysis(&raw, "", &en()).clauses[0];

        assert_eq!(clause.title, "Untitled Clause");
        assert_eq!(clause.source_excerpt, "No excerpt available");
        assert_eq!(clause.explanation_en, "No explanation available");
        assert_eq!(clause.risk_level, RiskLevel::Medium);
        assert_eq!(clause.risk_reasons, vec!["Risk assessment required"]);
        assert_eq!(clause.india_markers, vec!["general_legal"]);
    }

    #[test]
    fn test_whitespace_only_fields_take_defaults() {
        let raw = json!({
            "summary_en": "   ",
            "summary_local": "\t\n",
            "clauses": [{"title": " ", "source_excerpt": "  \t "}],
            "disclaimer": " "
        })
        .to_string();

        let result = normalize_analysis(&raw, "", &en());

        assert_eq!(result.summary_en, "No English summary available");
        assert_eq!(result.summary_local, "No local summary available");
        assert_eq!(result.clauses[0].title, "Untitled Clause");
        assert_eq!(result.clauses[0].source_excerpt, "No excerpt available");
        assert_eq!(result.disclaimer, DEFAULT_DISCLAIMER);
    }

    #[test]
    fn test_risk_level_clamping() {
        let raw = json!({"clauses": [
            {"risk_level": "high"},
            {"risk_level": "SEVERE"},
            {"risk_level": 3},
            {"risk_level": "LOW"}
        ]})
        .to_string();

        let clauses = normalize_analysis(&raw, "", &en()).clauses;
        assert_eq!(clauses[0].risk_level, RiskLevel::Medium);
        assert_eq!(clauses[1].risk_level, RiskLevel::Medium);
        assert_eq!(clauses[2].risk_level, RiskLevel::Medium);
        assert_eq!(clauses[3].risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_empty_arrays_stay_empty() {
        let raw = json!({
            "clauses": [{"risk_reasons": [], "india_markers": []}],
            "recommended_questions": []
        })
        .to_string();

        let result = normalize_analysis(&raw, "", &en());
        assert!(result.recommended_questions.is_empty());
        assert!(result.clauses[0].risk_reasons.is_empty());
        assert!(result.clauses[0].india_markers.is_empty());
    }

    #[test]
    fn test_parse_failure_builds_structured_result() {
        let raw = "I could not produce JSON for this document, sorry.";
        let result = normalize_analysis(raw, "WHEREAS the lessor agrees...", &en());

        assert!(result.summary_en.starts_with("I could not produce JSON"));
        assert!(result.summary_en.ends_with("..."));
        assert_eq!(result.clauses.len(), 1);
        assert_eq!(result.clauses[0].title, "Document Analysis");
        assert!(result.clauses[0].source_excerpt.starts_with("WHEREAS the lessor"));
        assert_eq!(result.clauses[0].risk_level, RiskLevel::Medium);
        assert_eq!(result.recommended_questions.len(), 4);
        assert_eq!(result.disclaimer, FULL_DISCLAIMER);
    }

    #[test]
    fn test_never_fails_contract() {
        let inputs = [
            "",
            "not json at all",
            "{\"summary_en\": \"truncated",
            "{\"summary_en\": \"   \", \"disclaimer\": \"\\t\"}",
            "[1, 2, 3]",
            "null",
            "```json\n{\"summary_en\": \"fenced\"}\n```",
        ];

        for input in inputs {
            let result = normalize_analysis(input, "original", &hi());
            assert!(!result.summary_en.is_empty(), "input: {:?}", input);
            assert!(!result.summary_local.is_empty(), "input: {:?}", input);
            assert!(!result.disclaimer.is_empty(), "input: {:?}", input);
        }
    }

    #[test]
    fn test_normalization_idempotent() {
        // The clause excerpt is whitespace-only: it must land on the default
        // in one pass, not drift to it across passes
        let raw = json!({
            "summary_en": "  spaced   out ",
            "summary_local": "ठीक है",
            "clauses": [{"title": " Deposit ", "source_excerpt": "   ", "risk_level": "HIGH"}],
            "recommended_questions": [" q1 ", "q2"],
            "disclaimer": "d"
        })
        .to_string();

        let once = normalize_analysis(&raw, "", &hi());
        let again = normalize_analysis(&serde_json::to_string(&once).unwrap(), "", &hi());
        assert_eq!(once, again);
        assert_eq!(once.clauses[0].source_excerpt, "No excerpt available");
    }

    #[test]
    fn test_chat_response_parsing() {
        let raw = r#"```json
{"answer": "The fine is Rs 500.", "evidence": [{"chunk_id": 1, "snippet": "fine of Rs 500"}]}
```"#;
        let response = normalize_chat_response(raw);

        assert_eq!(response.answer, "The fine is Rs 500.");
        assert_eq!(response.evidence.len(), 1);
        assert_eq!(response.evidence[0].chunk_id, 1);
    }

    #[test]
    fn test_chat_response_plain_text_fallback() {
        let raw = "  The document does not state a deadline.  ";
        let response = normalize_chat_response(raw);

        assert_eq!(response.answer, "The document does not state a deadline.");
        assert!(response.evidence.is_empty());
    }

    #[test]
    fn test_chat_fallback_keeps_full_prose_with_braces() {
        let raw = "Section {unclear} applies here, see clause 4.";
        let response = normalize_chat_response(raw);
        assert_eq!(response.answer, raw);
    }
}
