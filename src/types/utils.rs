//! Shared utility functions for type coercion and text cleanup.

use crate::types::RiskLevel;

// =============================================================================
// JSON Value Extraction
// =============================================================================

/// Extract string from JSON value by key.
///
/// Replaces verbose `v.get("key")?.as_str()?.to_string()` patterns.
#[inline]
pub fn json_string(value: &serde_json::Value, key: &str) -> Option<String> {
    value.get(key)?.as_str().map(String::from)
}

// =============================================================================
// Text Cleanup
// =============================================================================

/// Normalize extracted or model-produced text: drop non-whitespace control
/// characters (including DEL), collapse whitespace runs to single spaces,
/// and trim. Idempotent.
pub fn clean_text(text: &str) -> String {
    let stripped: String = text
        .chars()
        .filter(|c| !c.is_control() || c.is_whitespace())
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First `max_chars` characters of `text` with a trailing ellipsis.
///
/// The ellipsis is always appended, matching how truncated excerpts are
/// presented in summaries and fallback clauses.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let head: String = text.chars().take(max_chars).collect();
    format!("{}...", head)
}

// =============================================================================
// Type Parsing
// =============================================================================

/// Trait for parsing strings into enum types with a default fallback.
/// Used for coercing model-produced values where invalid strings should fall
/// back gracefully. Logs a warning when an invalid value is encountered.
pub trait ParseWithDefault: Sized {
    /// The name of this type for logging purposes.
    fn type_name() -> &'static str;

    /// The default value to use when parsing fails.
    fn default_value() -> Self;

    /// Try to parse the string, returning None if invalid.
    fn try_parse(s: &str) -> Option<Self>;

    /// Parse a string into this type, returning a default value if parsing
    /// fails. Logs a warning for invalid values so schema drift is visible.
    fn parse_or_default(s: &str) -> Self {
        match Self::try_parse(s) {
            Some(v) => v,
            None => {
                tracing::warn!("Invalid {} value '{}', using default", Self::type_name(), s);
                Self::default_value()
            }
        }
    }
}

impl ParseWithDefault for RiskLevel {
    fn type_name() -> &'static str {
        "RiskLevel"
    }

    fn default_value() -> Self {
        RiskLevel::Medium
    }

    // Exact uppercase match only: "high", "Medium", or garbage all clamp
    // to the default.
    fn try_parse(s: &str) -> Option<Self> {
        match s {
            "LOW" => Some(RiskLevel::Low),
            "MEDIUM" => Some(RiskLevel::Medium),
            "HIGH" => Some(RiskLevel::High),
            _ => None,
        }
    }
}
