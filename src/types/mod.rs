pub mod analysis;
pub mod error;
pub mod utils;

pub use analysis::{AnalysisReport, AnalysisResult, ChatResponse, Clause, Evidence, RiskLevel};
pub use error::{ErrorCategory, ErrorClassifier, LegalEaseError, Result};
pub use utils::{ParseWithDefault, clean_text, excerpt, json_string};

// =============================================================================
// Domain Newtypes
// =============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type-safe wrapper for two-letter language codes
///
/// Any code other than `hi` is treated as English-equivalent by the prompt
/// and fallback logic, so arbitrary codes are accepted without validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Whether the local-language surfaces should use Hindi (Devanagari).
    pub fn is_hindi(&self) -> bool {
        self.0 == "hi"
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self("en".to_string())
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for LanguageCode {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for LanguageCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for LanguageCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
