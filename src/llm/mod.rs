//! LLM (Large Language Model) integration module
//!
//! The name-idea generator: asks a chat model for project names and hands the
//! session a clean list of strings.

pub mod generator;
pub mod parser;
pub mod providers;

// Re-export main functionality
pub use generator::NameGenerator;
pub use parser::parse_name_list;

use crate::error::Result;
use crate::types::LlmConfig;
use async_trait::async_trait;

/// Core trait for all LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send one system + user message pair and return the reply text
    async fn complete(&self, system: &str, prompt: &str) -> Result<String>;

    /// Get provider name
    fn name(&self) -> &'static str;

    /// Get model name being used
    fn model(&self) -> &str;
}

/// Get available LLM providers
pub fn available_providers() -> Vec<&'static str> {
    vec!["openai", "anthropic"]
}

/// Default model for a provider
pub fn default_model(provider: &str) -> &'static str {
    match provider {
        "anthropic" => "claude-sonnet-4-0",
        _ => "gpt-4.1-mini",
    }
}

/// Environment variable holding the API key of a provider
pub fn api_key_var(provider: &str) -> Option<&'static str> {
    match provider {
        "openai" => Some("OPENAI_API_KEY"),
        "anthropic" => Some("ANTHROPIC_API_KEY"),
        _ => None,
    }
}

/// Create an LLM provider from configuration
pub fn create_provider(config: &LlmConfig) -> Result<Box<dyn LlmProvider>> {
    match config.provider.as_str() {
        "openai" => Ok(Box::new(providers::OpenAiProvider::new(config)?)),
        "anthropic" => Ok(Box::new(providers::AnthropicProvider::new(config)?)),
        _ => Err(crate::error::DomainScoutError::config(format!(
            "Unsupported LLM provider: {}. Supported providers: {}",
            config.provider,
            available_providers().join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_provider_is_rejected() {
        let config = LlmConfig {
            provider: "gemini".to_string(),
            api_key: "key".to_string(),
            ..Default::default()
        };
        assert!(create_provider(&config).is_err());
    }

    #[test]
    fn test_missing_api_key_is_a_config_error() {
        let config = LlmConfig::default();
        let err = create_provider(&config).err().unwrap();
        assert!(matches!(err, crate::error::DomainScoutError::Config { .. }));
    }

    #[test]
    fn test_provider_metadata() {
        assert_eq!(api_key_var("openai"), Some("OPENAI_API_KEY"));
        assert_eq!(api_key_var("ollama"), None);
        assert_eq!(default_model("anthropic"), "claude-sonnet-4-0");
        assert_eq!(default_model("openai"), "gpt-4.1-mini");
    }
}
