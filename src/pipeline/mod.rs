//! Analysis Pipeline
//!
//! Top-level orchestration for document analysis, chat, and summaries.
//!
//! ## Flow
//!
//! ```text
//! Validate → Extract → {SingleShot | Chunked} → Normalize/Combine → Done
//!               ↓              ↓                        ↓
//!               └──────→   Fallback   ←─────────────────┘
//! ```
//!
//! ## Guarantees
//!
//! - Analysis never raises past input validation: extraction, network, and
//!   parse failures all resolve to a deterministic fallback result.
//! - Chunked analysis skips failed chunks instead of aborting, so one bad
//!   window never voids the whole document.
//! - Chat and summary calls have no fallback; their errors propagate with a
//!   category the caller can display.

pub mod chunker;
pub mod combine;
pub mod fallback;

pub use chunker::split_text;
pub use combine::combine_analyses;
pub use fallback::fallback_analysis;

use std::path::Path;

use tracing::{info, warn};

use crate::ai::{
    GenerationSettings, PromptPart, PromptTemplates, SharedModel, normalize_analysis,
    normalize_chat_response,
};
use crate::constants::chunking::LARGE_DOCUMENT_CHARS;
use crate::extract::{self, ExtractedContent, MediaType};
use crate::types::utils::clean_text;
use crate::types::{AnalysisReport, AnalysisResult, ChatResponse, LanguageCode, Result};

// =============================================================================
// Pipeline
// =============================================================================

/// Document analysis pipeline bound to one generative model.
pub struct Pipeline {
    model: SharedModel,
}

impl Pipeline {
    pub fn new(model: SharedModel) -> Self {
        Self { model }
    }

    /// Analyze a document file.
    ///
    /// Input validation failures (missing file, oversized file, unsupported
    /// type) surface as errors; once the bytes are accepted the analysis
    /// itself cannot fail.
    pub async fn analyze_file(
        &self,
        path: &Path,
        language: &LanguageCode,
    ) -> Result<AnalysisReport> {
        let (bytes, media_type) = extract::read_file(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Ok(self
            .analyze_bytes(&bytes, media_type, &file_name, language)
            .await)
    }

    /// Analyze an accepted byte buffer. Never fails: extraction errors
    /// resolve through the fallback analyzer with the filename as the only
    /// classification signal.
    pub async fn analyze_bytes(
        &self,
        bytes: &[u8],
        media_type: MediaType,
        file_name: &str,
        language: &LanguageCode,
    ) -> AnalysisReport {
        match extract::extract(bytes, media_type) {
            Ok(content) => self.analyze_content(content, file_name, language).await,
            Err(e) => {
                warn!("Extraction failed for {}: {}", file_name, e);
                AnalysisReport::new(
                    fallback_analysis("", file_name, language),
                    file_name,
                    0,
                    language.clone(),
                )
                .mark_fallback()
            }
        }
    }

    /// Analyze already-extracted content.
    pub async fn analyze_content(
        &self,
        content: ExtractedContent,
        file_name: &str,
        language: &LanguageCode,
    ) -> AnalysisReport {
        match content {
            ExtractedContent::Text(text) => self.analyze_text(&text, file_name, language).await,
            ExtractedContent::Image {
                media_type,
                data_base64,
            } => {
                self.analyze_image(media_type, data_base64, file_name, language)
                    .await
            }
        }
    }

    /// Analyze extracted document text, routing long documents through the
    /// chunked path. Never fails.
    pub async fn analyze_text(
        &self,
        text: &str,
        file_name: &str,
        language: &LanguageCode,
    ) -> AnalysisReport {
        if text.chars().count() > LARGE_DOCUMENT_CHARS {
            self.analyze_chunked(text, file_name, language).await
        } else {
            self.analyze_single(text, file_name, language).await
        }
    }

    /// Answer a question about a previously analyzed document.
    pub async fn chat(&self, question: &str, context: Option<&str>) -> Result<ChatResponse> {
        let prompt = PromptTemplates::chat(question, context);
        let raw = self
            .model
            .generate(&[PromptPart::text(prompt)], GenerationSettings::standard())
            .await?;
        Ok(normalize_chat_response(&raw))
    }

    /// Produce a plain-text summary in the requested language.
    pub async fn summarize(&self, text: &str, language: &LanguageCode) -> Result<String> {
        let prompt = PromptTemplates::summary(text, language);
        let raw = self
            .model
            .generate(&[PromptPart::text(prompt)], GenerationSettings::summary())
            .await?;
        Ok(clean_text(&raw))
    }

    // -------------------------------------------------------------------------
    // Internal paths
    // -------------------------------------------------------------------------

    async fn analyze_single(
        &self,
        text: &str,
        file_name: &str,
        language: &LanguageCode,
    ) -> AnalysisReport {
        let text_length = text.chars().count();
        info!("Analyzing {} ({} chars, single shot)", file_name, text_length);

        let prompt = PromptTemplates::document_analysis(text, language);
        match self.generate_analysis(&prompt, text, language).await {
            Ok(analysis) => {
                AnalysisReport::new(analysis, file_name, text_length, language.clone())
            }
            Err(e) => {
                warn!("Analysis of {} failed ({}), using fallback", file_name, e);
                AnalysisReport::new(
                    fallback_analysis(text, file_name, language),
                    file_name,
                    text_length,
                    language.clone(),
                )
                .mark_fallback()
            }
        }
    }

    async fn analyze_chunked(
        &self,
        text: &str,
        file_name: &str,
        language: &LanguageCode,
    ) -> AnalysisReport {
        let chunks = split_text(text);
        let total = chunks.len();
        info!(
            "Analyzing {} ({} chars) in {} chunks",
            file_name,
            text.chars().count(),
            total
        );

        let mut results = Vec::new();
        for (i, chunk) in chunks.iter().enumerate() {
            let prompt = PromptTemplates::chunk_analysis(chunk, i + 1, total, language);
            match self.generate_analysis(&prompt, chunk, language).await {
                Ok(analysis) => results.push(analysis),
                // Skip, never abort: remaining chunks still carry value
                Err(e) => warn!("Chunk {}/{} failed, skipping: {}", i + 1, total, e),
            }
        }

        let all_failed = results.is_empty();
        let analysis = combine_analyses(results, language);
        let report =
            AnalysisReport::new(analysis, file_name, text.chars().count(), language.clone())
                .with_chunks(total);

        if all_failed {
            report.mark_fallback()
        } else {
            report
        }
    }

    async fn analyze_image(
        &self,
        media_type: MediaType,
        data_base64: String,
        file_name: &str,
        language: &LanguageCode,
    ) -> AnalysisReport {
        info!("Analyzing {} via vision path", file_name);

        let parts = [
            PromptPart::text(PromptTemplates::image_analysis(language)),
            PromptPart::InlineImage {
                mime_type: media_type.mime().to_string(),
                data_base64,
            },
        ];

        match self
            .model
            .generate(&parts, GenerationSettings::standard())
            .await
        {
            Ok(raw) => AnalysisReport::new(
                // No extracted text exists on the vision path
                normalize_analysis(&raw, "", language),
                file_name,
                0,
                language.clone(),
            ),
            Err(e) => {
                warn!("Image analysis of {} failed ({}), using fallback", file_name, e);
                AnalysisReport::new(
                    fallback_analysis("", file_name, language),
                    file_name,
                    0,
                    language.clone(),
                )
                .mark_fallback()
            }
        }
    }

    async fn generate_analysis(
        &self,
        prompt: &str,
        source_text: &str,
        language: &LanguageCode,
    ) -> Result<AnalysisResult> {
        let raw = self
            .model
            .generate(
                &[PromptPart::text(prompt)],
                GenerationSettings::standard(),
            )
            .await?;
        Ok(normalize_analysis(&raw, source_text, language))
    }
}
