//! CLI Common Utilities
//!
//! Shared context loading and input handling for CLI commands.
//! Eliminates duplicate code across command handlers.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use crate::ai::GeminiClient;
use crate::config::{Config, ConfigLoader};
use crate::pipeline::Pipeline;
use crate::types::{LanguageCode, Result};

/// Command execution context
///
/// Loads the merged configuration once and hands out the resources a
/// command needs. Commands that never talk to the model (`extract`,
/// `config`) skip `pipeline()` and with it the API-key requirement.
pub struct CommandContext {
    /// Loaded configuration
    pub config: Config,
}

impl CommandContext {
    pub fn load() -> Result<Self> {
        let config = ConfigLoader::load()?;
        Ok(Self { config })
    }

    /// Build the analysis pipeline against the configured endpoint.
    /// Fails fast with a `Config` error when no API key is set.
    pub fn pipeline(&self) -> Result<Pipeline> {
        let client = GeminiClient::new(&self.config.api)?;
        Ok(Pipeline::new(Arc::new(client)))
    }

    /// Resolve the output language: the CLI flag wins over the configured
    /// default.
    pub fn language(&self, flag: Option<&str>) -> LanguageCode {
        match flag {
            Some(code) => LanguageCode::new(code),
            None => LanguageCode::new(&self.config.analysis.language),
        }
    }
}

/// Read text from a path, or from stdin when the argument is `-`.
pub fn read_text_input(arg: &str) -> Result<String> {
    if arg == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(std::fs::read_to_string(Path::new(arg))?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_language_resolution_prefers_flag() {
        let ctx = CommandContext {
            config: Config::default(),
        };

        assert_eq!(ctx.language(Some("hi")).as_str(), "hi");
        // Config default is "en"
        assert_eq!(ctx.language(None).as_str(), "en");
    }

    #[test]
    fn test_read_text_input_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all("contract text\n".as_bytes()).unwrap();

        let text = read_text_input(&file.path().to_string_lossy()).unwrap();
        assert_eq!(text, "contract text\n");
    }

    #[test]
    fn test_read_text_input_missing_file() {
        assert!(read_text_input("/no/such/context.txt").is_err());
    }
}
