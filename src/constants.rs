//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! All magic numbers should be defined here with documentation.

/// Document intake constants
pub mod intake {
    /// Maximum accepted upload size (10MB)
    pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
}

/// Chunking constants
pub mod chunking {
    /// Target window size per chunk (characters)
    pub const CHUNK_CHARS: usize = 50_000;

    /// Documents longer than this take the chunked path (characters)
    pub const LARGE_DOCUMENT_CHARS: usize = 100_000;

    /// A sentence/newline break is only honored past this fraction of the
    /// window, so chunks never collapse to pathologically short pieces
    pub const MIN_BREAK_FRACTION: f64 = 0.5;
}

/// Generation parameters sent with every model call
///
/// Fixed per task kind, not user-configurable; analysis and chat share the
/// same settings, summaries get a tighter output cap.
pub mod generation {
    pub const TEMPERATURE: f64 = 0.7;
    pub const TOP_K: u32 = 40;
    pub const TOP_P: f64 = 0.95;

    /// Output token cap for analysis and chat calls
    pub const MAX_OUTPUT_TOKENS: u32 = 2048;

    /// Output token cap for summary calls
    pub const SUMMARY_MAX_OUTPUT_TOKENS: u32 = 1024;
}

/// Excerpt lengths used when degrading raw model text into a structured
/// result (characters)
pub mod excerpts {
    /// Raw text carried into `summary_en` on parse failure
    pub const SUMMARY_CHARS: usize = 500;

    /// Raw text carried into a synthesized clause explanation
    pub const EXPLANATION_CHARS: usize = 300;

    /// Source text carried into a clause excerpt
    pub const SOURCE_CHARS: usize = 200;

    /// Disclaimers shorter than this are treated as boilerplate-free and
    /// skipped when merging chunk results
    pub const MIN_DISCLAIMER_CHARS: usize = 50;
}

/// HTTP/Network constants
pub mod network {
    /// Default request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

    /// Connection timeout (seconds)
    pub const CONNECTION_TIMEOUT_SECS: u64 = 10;
}
