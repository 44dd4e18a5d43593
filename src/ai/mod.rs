//! AI Integration Layer
//!
//! Prompt construction, the Gemini client, and response normalization.

pub mod client;
pub mod normalize;
pub mod prompt;

pub use client::{
    API_KEY_ENV, GeminiClient, GenerationSettings, GenerativeModel, PromptPart, SharedModel,
};
pub use normalize::{clean_json_response, normalize_analysis, normalize_chat_response};
pub use prompt::{PromptBuilder, PromptTemplates};
