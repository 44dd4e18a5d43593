//! LegalEase - Plain-Language Legal Document Analysis
//!
//! Analyzes Indian legal documents (PDF, DOCX, or photographed notices) and
//! produces structured plain-language results: bilingual summaries,
//! clause-level risk ratings, and suggested follow-up questions.
//!
//! ## Core Features
//!
//! - **Document Intake**: PDF/DOCX text extraction, image pass-through for
//!   the vision path
//! - **Chunked Analysis**: long documents split at sentence boundaries and
//!   analyzed per chunk, partial failures tolerated
//! - **Tolerant Normalization**: model output is repaired and coerced into
//!   the canonical shape and never fails
//! - **Rule-Based Fallback**: deterministic analysis when the model is
//!   unavailable, with traffic-challan classification
//! - **Bilingual Output**: English plus localized (Hindi) summaries
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use legalease::{ConfigLoader, GeminiClient, LanguageCode, Pipeline};
//!
//! let config = ConfigLoader::load()?;
//! let client = GeminiClient::new(&config.api)?;
//! let pipeline = Pipeline::new(Arc::new(client));
//!
//! let report = pipeline
//!     .analyze_file(Path::new("challan.pdf"), &LanguageCode::from("hi"))
//!     .await?;
//! println!("{}", report.analysis.summary_en);
//! ```
//!
//! ## Modules
//!
//! - [`extract`]: intake validation, PDF/DOCX text extraction
//! - [`ai`]: prompt construction, Gemini client, response normalization
//! - [`pipeline`]: analyze/chat/summarize orchestration, chunking, fallback
//! - [`config`]: layered configuration (defaults, TOML files, env)
//! - [`cli`]: command implementations

pub mod ai;
pub mod cli;
pub mod config;
pub mod constants;
pub mod extract;
pub mod pipeline;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{AnalysisConfig, ApiConfig, Config, ConfigLoader};

// Error Types
pub use types::error::{ErrorCategory, ErrorClassifier, LegalEaseError, Result};

// Domain Types
pub use types::{
    AnalysisReport, AnalysisResult, ChatResponse, Clause, Evidence, LanguageCode, RiskLevel,
};

// =============================================================================
// Pipeline Re-exports
// =============================================================================

pub use pipeline::{Pipeline, combine_analyses, fallback_analysis, split_text};

// =============================================================================
// AI Re-exports
// =============================================================================

pub use ai::{GeminiClient, GenerationSettings, GenerativeModel, PromptPart, SharedModel};

// =============================================================================
// Extraction Re-exports
// =============================================================================

pub use extract::{ExtractedContent, MediaType};
