//! Generative API Client
//!
//! Single-call HTTP client for the Gemini `generateContent` endpoint with
//! secure API key handling. One network call per prompt; retries are never
//! attempted here (the chunked path's skip-on-failure policy lives in the
//! orchestrator).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::config::ApiConfig;
use crate::constants::{generation, network};
use crate::types::{LegalEaseError, Result};

// =============================================================================
// Prompt Parts & Generation Settings
// =============================================================================

/// One part of a generation request: instruction text or an inline image.
#[derive(Debug, Clone)]
pub enum PromptPart {
    Text(String),
    InlineImage {
        mime_type: String,
        data_base64: String,
    },
}

impl PromptPart {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }
}

/// Fixed sampling settings for one call.
///
/// These are deliberately not user-configurable: identical settings per task
/// kind keep analysis output stable across requests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub max_output_tokens: u32,
}

impl GenerationSettings {
    /// Settings for analysis and chat calls.
    pub fn standard() -> Self {
        Self {
            temperature: generation::TEMPERATURE,
            top_k: generation::TOP_K,
            top_p: generation::TOP_P,
            max_output_tokens: generation::MAX_OUTPUT_TOKENS,
        }
    }

    /// Settings for summary calls (tighter output cap).
    pub fn summary() -> Self {
        Self {
            max_output_tokens: generation::SUMMARY_MAX_OUTPUT_TOKENS,
            ..Self::standard()
        }
    }
}

// =============================================================================
// Model Abstraction
// =============================================================================

/// Generation seam for the pipeline; orchestrator tests run against a
/// scripted implementation instead of the network.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Issue one generation call, returning the raw candidate text.
    async fn generate(&self, parts: &[PromptPart], settings: GenerationSettings)
    -> Result<String>;

    /// Model name for logging
    fn model(&self) -> &str;
}

/// Shared model handle for use across pipeline stages.
pub type SharedModel = Arc<dyn GenerativeModel + Send + Sync>;

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

// =============================================================================
// Gemini Client
// =============================================================================

/// Gemini API client with secure API key handling
pub struct GeminiClient {
    /// API key stored securely - never exposed in logs or debug output
    api_key: SecretString,
    endpoint: Url,
    model: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_key", &"[REDACTED]")
            .field("endpoint", &self.endpoint.as_str())
            .field("model", &self.model)
            .finish()
    }
}

impl GeminiClient {
    /// Construct from config, sourcing the key from `GEMINI_API_KEY`.
    ///
    /// A missing key is a construction-time configuration error, never a
    /// per-request surprise.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                LegalEaseError::Config(format!(
                    "Gemini API key not found. Set the {} env var",
                    API_KEY_ENV
                ))
            })?;

        Self::with_api_key(config, SecretString::from(api_key))
    }

    /// Construct with an explicit key (programmatic callers, tests).
    pub fn with_api_key(config: &ApiConfig, api_key: SecretString) -> Result<Self> {
        let base = config.base_url.trim_end_matches('/');
        let endpoint = Url::parse(&format!(
            "{}/v1beta/models/{}:generateContent",
            base, config.model
        ))
        .map_err(|e| {
            LegalEaseError::Config(format!("Invalid API base URL '{}': {}", config.base_url, e))
        })?;

        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(network::CONNECTION_TIMEOUT_SECS))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                LegalEaseError::Config(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            api_key,
            endpoint,
            model: config.model.clone(),
            client,
        })
    }

    /// Endpoint without the key query parameter, safe for display.
    pub fn endpoint_display(&self) -> &str {
        self.endpoint.as_str()
    }

    fn build_request(
        parts: &[PromptPart],
        settings: GenerationSettings,
    ) -> GenerateContentRequest {
        let parts = parts
            .iter()
            .map(|part| match part {
                PromptPart::Text(text) => Part {
                    text: Some(text.clone()),
                    inline_data: None,
                },
                PromptPart::InlineImage {
                    mime_type,
                    data_base64,
                } => Part {
                    text: None,
                    inline_data: Some(InlineData {
                        mime_type: mime_type.clone(),
                        data: data_base64.clone(),
                    }),
                },
            })
            .collect();

        GenerateContentRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                temperature: settings.temperature,
                top_k: settings.top_k,
                top_p: settings.top_p,
                max_output_tokens: settings.max_output_tokens,
            },
        }
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(
        &self,
        parts: &[PromptPart],
        settings: GenerationSettings,
    ) -> Result<String> {
        info!(
            "Generating with Gemini (model: {}, max_output_tokens: {})",
            self.model, settings.max_output_tokens
        );

        let request = Self::build_request(parts, settings);

        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("key", self.api_key.expose_secret());

        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| LegalEaseError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LegalEaseError::remote(
                status.as_u16(),
                api_error_message(&body, &status),
            ));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LegalEaseError::RequestFailed(format!("Malformed response: {}", e)))?;

        debug!("Received response from Gemini");
        first_candidate_text(body).ok_or(LegalEaseError::EmptyResponse)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Pull the human-readable message out of an error body, which is usually
/// `{"error": {"message": ...}}`, falling back to the raw body or the status
/// reason.
fn api_error_message(body: &str, status: &reqwest::StatusCode) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body)
        && let Some(message) = value
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
    {
        return message.to_string();
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        status.canonical_reason().unwrap_or("request failed").to_string()
    } else {
        trimmed.to_string()
    }
}

/// `candidates[0].content.parts[0].text`, if present and non-blank.
fn first_candidate_text(response: GenerateContentResponse) -> Option<String> {
    let text = response
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .next()?
        .text?;

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    top_k: u32,
    top_p: f64,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ApiConfig {
        ApiConfig {
            base_url: "https://generativelanguage.googleapis.com/".to_string(),
            model: "gemini-1.5-flash".to_string(),
            timeout_secs: 30,
        }
    }

    fn test_client() -> GeminiClient {
        GeminiClient::with_api_key(&test_config(), SecretString::from("test-key")).unwrap()
    }

    #[test]
    fn test_endpoint_assembly() {
        let client = test_client();
        assert_eq!(
            client.endpoint_display(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn test_invalid_base_url_fails_fast() {
        let mut config = test_config();
        config.base_url = "not a url".to_string();
        let result = GeminiClient::with_api_key(&config, SecretString::from("k"));
        assert!(matches!(result, Err(LegalEaseError::Config(_))));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let client = test_client();
        let debug = format!("{:?}", client);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("test-key"));
    }

    #[test]
    fn test_generation_settings() {
        let standard = GenerationSettings::standard();
        assert_eq!(standard.temperature, 0.7);
        assert_eq!(standard.top_k, 40);
        assert_eq!(standard.top_p, 0.95);
        assert_eq!(standard.max_output_tokens, 2048);

        let summary = GenerationSettings::summary();
        assert_eq!(summary.max_output_tokens, 1024);
        assert_eq!(summary.temperature, standard.temperature);
    }

    #[test]
    fn test_request_wire_shape() {
        let parts = vec![
            PromptPart::text("Analyze this"),
            PromptPart::InlineImage {
                mime_type: "image/png".to_string(),
                data_base64: "aGk=".to_string(),
            },
        ];
        let request = GeminiClient::build_request(&parts, GenerationSettings::standard());
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["contents"][0]["parts"][0]["text"], "Analyze this");
        assert!(json["contents"][0]["parts"][0].get("inline_data").is_none());
        assert_eq!(
            json["contents"][0]["parts"][1]["inline_data"]["mime_type"],
            "image/png"
        );
        assert_eq!(json["generationConfig"]["topK"], 40);
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 2048);
    }

    #[test]
    fn test_first_candidate_text() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"hello"},{"text":"ignored"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(first_candidate_text(response).as_deref(), Some("hello"));
    }

    #[test]
    fn test_first_candidate_text_missing() {
        let empty: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(first_candidate_text(empty), None);

        let blank: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#)
                .unwrap();
        assert_eq!(first_candidate_text(blank), None);
    }

    #[test]
    fn test_api_error_message_extraction() {
        let status = reqwest::StatusCode::BAD_REQUEST;
        assert_eq!(
            api_error_message(r#"{"error":{"message":"API key not valid"}}"#, &status),
            "API key not valid"
        );
        assert_eq!(api_error_message("plain body", &status), "plain body");
        assert_eq!(api_error_message("", &status), "Bad Request");
    }
}
