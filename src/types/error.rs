//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//! Provides error classification for user-facing messaging: the pipeline
//! itself never retries, but callers need to know whether a failure is a
//! configuration problem, a quota problem, or a transient network problem.
//!
//! ## Error Categories
//!
//! - **Configuration**: missing/invalid API key or endpoint (fail fast)
//! - **Quota**: rate limiting or usage caps (retry later)
//! - **Network**: connectivity/timeout/server issues (retry now)
//! - **Unknown**: everything else (generic "try again" messaging)
//!
//! ## Design Principles
//!
//! - Single unified error type (LegalEaseError) for the entire application
//! - Structured variants with context for better debugging
//! - Category-based classification for display, not for automatic retry

use thiserror::Error;

// =============================================================================
// Error Categories
// =============================================================================

/// Error categories for user-facing classification of remote failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Missing or rejected credentials / endpoint setup - fail fast
    Configuration,
    /// Rate limit or usage quota exhausted - retry later
    Quota,
    /// Connectivity, timeout, or server-side trouble - retry now
    Network,
    /// Unclassified failure - generic messaging
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Quota => write!(f, "QUOTA"),
            Self::Network => write!(f, "NETWORK"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

impl ErrorCategory {
    /// Short user-facing hint for CLI error output
    pub fn hint(&self) -> &'static str {
        match self {
            Self::Configuration => {
                "Check that your API key and endpoint are configured correctly"
            }
            Self::Quota => "The service quota or rate limit was reached; try again later",
            Self::Network => "A network or service problem occurred; try again",
            Self::Unknown => "The request failed; try again",
        }
    }
}

// =============================================================================
// Error Classifier
// =============================================================================

/// Classifies remote failures for display purposes
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Classify an error message by substring matching
    pub fn classify(message: &str) -> ErrorCategory {
        let lower = message.to_lowercase();

        // Configuration patterns (bad keys surface as 400s with these bodies)
        if lower.contains("api key")
            || lower.contains("unauthorized")
            || lower.contains("permission")
            || lower.contains("credential")
        {
            return ErrorCategory::Configuration;
        }

        // Quota patterns
        if lower.contains("quota")
            || lower.contains("rate limit")
            || lower.contains("limit")
            || lower.contains("too many requests")
        {
            return ErrorCategory::Quota;
        }

        // Network patterns
        if lower.contains("network")
            || lower.contains("connection")
            || lower.contains("timeout")
            || lower.contains("timed out")
            || lower.contains("unreachable")
        {
            return ErrorCategory::Network;
        }

        ErrorCategory::Unknown
    }

    /// Classify an HTTP status code, falling back to message matching when
    /// the status alone is ambiguous
    pub fn classify_http_status(status: u16, message: &str) -> ErrorCategory {
        match status {
            401 | 403 => ErrorCategory::Configuration,
            429 => ErrorCategory::Quota,
            408 | 500..=599 => ErrorCategory::Network,
            _ => Self::classify(message),
        }
    }
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum LegalEaseError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Input Errors
    // -------------------------------------------------------------------------
    #[error("Unsupported file type: {media_type}")]
    UnsupportedFileType { media_type: String },

    #[error("File too large: {size} bytes exceeds the {limit} byte limit")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("No text could be extracted from the file")]
    NoTextExtracted,

    #[error("Extraction failed: {0}")]
    Extraction(String),

    // -------------------------------------------------------------------------
    // Remote Service Errors
    // -------------------------------------------------------------------------
    /// Transport-level failure before any HTTP status was received
    #[error("Remote request failed: {0}")]
    RequestFailed(String),

    /// Non-success HTTP response from the generative endpoint
    #[error("Remote service error (status {status}): {message}")]
    RemoteService { status: u16, message: String },

    /// Success response that carried no usable candidate text
    #[error("Remote service returned an empty response")]
    EmptyResponse,

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LegalEaseError>;

impl LegalEaseError {
    /// Create a remote service error
    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Self::RemoteService {
            status,
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an extraction error
    pub fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction(message.into())
    }

    /// Classify this error for user-facing display
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Config(_) => ErrorCategory::Configuration,
            Self::RemoteService { status, message } => {
                ErrorClassifier::classify_http_status(*status, message)
            }
            Self::RequestFailed(_) | Self::Io(_) => ErrorCategory::Network,
            _ => ErrorCategory::Unknown,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
