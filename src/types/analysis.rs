use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::LanguageCode;

/// Risk classification for a single clause.
///
/// Any model-produced value outside this set collapses to `Medium` during
/// normalization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One analyzed clause of a legal document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Clause {
    pub title: String,
    pub source_excerpt: String,
    pub explanation_en: String,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub risk_reasons: Vec<String>,
    #[serde(default)]
    pub india_markers: Vec<String>,
}

impl Clause {
    pub fn new(
        title: impl Into<String>,
        source_excerpt: impl Into<String>,
        explanation_en: impl Into<String>,
        risk_level: RiskLevel,
    ) -> Self {
        Self {
            title: title.into(),
            source_excerpt: source_excerpt.into(),
            explanation_en: explanation_en.into(),
            risk_level,
            risk_reasons: Vec::new(),
            india_markers: Vec::new(),
        }
    }

    pub fn with_reasons(mut self, reasons: &[&str]) -> Self {
        self.risk_reasons = reasons.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_markers(mut self, markers: &[&str]) -> Self {
        self.india_markers = markers.iter().map(|s| s.to_string()).collect();
        self
    }
}

/// The canonical analysis output shape.
///
/// Every path through the pipeline (single-shot, chunked, fallback) resolves
/// to this structure; after normalization all five fields are populated and
/// string content is whitespace-clean.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisResult {
    pub summary_en: String,
    pub summary_local: String,
    #[serde(default)]
    pub clauses: Vec<Clause>,
    #[serde(default)]
    pub recommended_questions: Vec<String>,
    pub disclaimer: String,
}

/// A cited span backing a chat answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Evidence {
    pub chunk_id: i64,
    pub snippet: String,
}

impl Evidence {
    pub fn new(chunk_id: i64, snippet: impl Into<String>) -> Self {
        Self {
            chunk_id,
            snippet: snippet.into(),
        }
    }
}

/// Answer to a document question, with optional supporting evidence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResponse {
    pub answer: String,
    #[serde(default)]
    pub evidence: Vec<Evidence>,
}

/// Analysis plus request metadata, the shape emitted by the CLI in JSON mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub analysis: AnalysisResult,
    pub file_name: String,
    pub text_length: usize,
    pub language: LanguageCode,
    pub chunked: bool,
    pub chunk_count: usize,
    pub fallback: bool,
    pub generated_at: DateTime<Utc>,
}

impl AnalysisReport {
    pub fn new(
        analysis: AnalysisResult,
        file_name: impl Into<String>,
        text_length: usize,
        language: LanguageCode,
    ) -> Self {
        Self {
            analysis,
            file_name: file_name.into(),
            text_length,
            language,
            chunked: false,
            chunk_count: 1,
            fallback: false,
            generated_at: Utc::now(),
        }
    }

    pub fn with_chunks(mut self, count: usize) -> Self {
        self.chunked = count > 1;
        self.chunk_count = count;
        self
    }

    pub fn mark_fallback(mut self) -> Self {
        self.fallback = true;
        self
    }
}
