//! Name generator using LLM

use crate::error::{DomainScoutError, Result};
use crate::llm::parser::parse_name_list;
use crate::llm::providers::{build_name_prompt, SYSTEM_PROMPT};
use crate::llm::{create_provider, LlmProvider};
use crate::session::CandidateSource;
use crate::types::LlmConfig;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

/// Generates candidate project names with the configured LLM providers.
///
/// The default provider is asked first; the others are tried in turn when it fails.
#[derive(Clone)]
pub struct NameGenerator {
    providers: Arc<RwLock<HashMap<String, Arc<dyn LlmProvider>>>>,
    default_provider: Arc<RwLock<String>>,
}

impl NameGenerator {
    /// Create a new name generator
    pub fn new() -> Self {
        Self {
            providers: Arc::new(RwLock::new(HashMap::new())),
            default_provider: Arc::new(RwLock::new("openai".to_string())),
        }
    }

    /// Add an LLM provider from configuration
    pub fn add_provider(&self, config: &LlmConfig) -> Result<()> {
        let provider = create_provider(config)?;
        self.insert_provider(Arc::from(provider));
        Ok(())
    }

    /// Register an already built provider under its own name
    pub fn insert_provider(&self, provider: Arc<dyn LlmProvider>) {
        let mut providers = self.providers.write();
        providers.insert(provider.name().to_string(), provider);
    }

    /// Set default provider
    pub fn set_default_provider(&self, provider: &str) {
        let providers = self.providers.read();
        if providers.contains_key(provider) {
            let mut default = self.default_provider.write();
            *default = provider.to_string();
        }
    }

    /// Ask one provider for names, avoiding `exclude`
    pub async fn generate_with_provider(
        &self,
        provider_name: &str,
        description: &str,
        exclude: &[String],
    ) -> Result<Vec<String>> {
        let start_time = Instant::now();

        // Clone the Arc so no lock is held across the request
        let provider = {
            let providers = self.providers.read();
            providers
                .get(provider_name)
                .ok_or_else(|| DomainScoutError::config(format!("Provider not configured: {}", provider_name)))?
                .clone()
        };

        let prompt = build_name_prompt(description, exclude);
        let result = provider
            .complete(SYSTEM_PROMPT, &prompt)
            .await
            .map(|reply| parse_name_list(&reply));

        match &result {
            Ok(names) => {
                tracing::info!(
                    provider = %provider_name,
                    model = %provider.model(),
                    names_count = %names.len(),
                    excluded = %exclude.len(),
                    duration_ms = %start_time.elapsed().as_millis(),
                    "Name generation completed"
                );
            }
            Err(e) => {
                tracing::warn!(
                    provider = %provider_name,
                    error = %e,
                    duration_ms = %start_time.elapsed().as_millis(),
                    "Name generation failed"
                );
            }
        }

        result
    }

    /// Ask the default provider, falling back to the others on failure
    pub async fn generate(&self, description: &str, exclude: &[String]) -> Result<Vec<String>> {
        let mut last_error = None;

        let default_provider = self.default_provider.read().clone();
        if self.has_provider(&default_provider) {
            match self.generate_with_provider(&default_provider, description, exclude).await {
                Ok(names) => return Ok(names),
                Err(e) => last_error = Some(e),
            }
        }

        let fallbacks: Vec<String> = {
            let providers = self.providers.read();
            let mut names: Vec<String> = providers
                .keys()
                .filter(|&name| name != &default_provider)
                .cloned()
                .collect();
            names.sort();
            names
        };

        for provider_name in fallbacks {
            match self.generate_with_provider(&provider_name, description, exclude).await {
                Ok(names) => {
                    tracing::info!(provider = %provider_name, fallback_used = true, "Used fallback provider");
                    return Ok(names);
                }
                Err(e) => last_error = Some(e),
            }
        }

        Err(last_error.unwrap_or_else(|| DomainScoutError::config("No LLM providers configured")))
    }

    /// Check if provider is available
    pub fn has_provider(&self, provider: &str) -> bool {
        self.providers.read().contains_key(provider)
    }

    /// Check if any providers are configured
    pub fn is_ready(&self) -> bool {
        !self.providers.read().is_empty()
    }
}

impl Default for NameGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CandidateSource for NameGenerator {
    async fn next_batch(&self, prompt: &str, exclude: &[String]) -> Result<Vec<String>> {
        self.generate(prompt, exclude).await
    }
}
