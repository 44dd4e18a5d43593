//! Health Command
//!
//! Configuration and readiness probe. Reports whether an API key is
//! present and what the effective settings are, without making a network
//! call. The key itself is never printed.

use crate::ai::API_KEY_ENV;
use crate::cli::ui::Output;
use crate::cli::util::CommandContext;
use crate::types::Result;

pub fn run() -> Result<()> {
    let out = Output::new();
    let ctx = CommandContext::load()?;

    out.header("LegalEase Health");

    let key_present = std::env::var(API_KEY_ENV)
        .map(|v| !v.trim().is_empty())
        .unwrap_or(false);

    if key_present {
        out.success(&format!("API key configured ({})", API_KEY_ENV));
    } else {
        out.error(&format!(
            "No API key found. Set the {} environment variable",
            API_KEY_ENV
        ));
    }

    out.info(&format!("Model:    {}", ctx.config.api.model));
    out.info(&format!("Endpoint: {}", ctx.config.api.base_url));
    out.info(&format!("Timeout:  {}s", ctx.config.api.timeout_secs));
    out.info(&format!("Language: {}", ctx.config.analysis.language));

    if !key_present {
        // Non-zero exit so scripts can gate on readiness
        return Err(crate::types::LegalEaseError::Config(
            "service is not ready: missing API key".to_string(),
        ));
    }

    Ok(())
}
