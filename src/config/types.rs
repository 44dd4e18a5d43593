//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/legalease/) and project (./legalease.toml)
//! level configuration. The API key itself never lives here; it is read from
//! the environment at client construction so it cannot leak through config
//! printing.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Remote generative API settings
    pub api: ApiConfig,

    /// Analysis defaults
    pub analysis: AnalysisConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            api: ApiConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `LegalEaseError::Config` on validation failure.
    pub fn validate(&self) -> crate::types::Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(crate::types::LegalEaseError::Config(
                "api.base_url must not be empty".to_string(),
            ));
        }

        if self.api.model.trim().is_empty() {
            return Err(crate::types::LegalEaseError::Config(
                "api.model must not be empty".to_string(),
            ));
        }

        if self.api.timeout_secs == 0 {
            return Err(crate::types::LegalEaseError::Config(
                "api.timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// API Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Endpoint base URL
    pub base_url: String,

    /// Model name
    pub model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-1.5-flash".to_string(),
            timeout_secs: crate::constants::network::DEFAULT_TIMEOUT_SECS,
        }
    }
}

// =============================================================================
// Analysis Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Default language code for summaries when the CLI is not told otherwise
    pub language: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
