//! LLM provider implementations
//!
//! Each provider is implemented in its own module for better organization and maintainability.

pub mod anthropic;
pub mod openai;

// Re-export providers for easy access
pub use anthropic::AnthropicProvider;
pub use openai::OpenAiProvider;

/// Instructions sent as the system message to every provider
pub const SYSTEM_PROMPT: &str = "You are a domain name generator. You are given a startup \
project description and you have to generate a list of fun, memorable and interesting \
potential names for the project. The names should be compact and sound nice. Respond with \
a comma-separated list of names only. Do not repeat domain name suggestions.";

/// Build the user message: the project description plus names to avoid
pub fn build_name_prompt(description: &str, exclude: &[String]) -> String {
    if exclude.is_empty() {
        return description.to_string();
    }

    format!(
        "{}\n\nDo not suggest any of these names, they were already checked: {}",
        description,
        exclude.join(", ")
    )
}

/// Map a non-success HTTP status to a readable message
pub(crate) fn describe_http_failure(provider: &str, status: reqwest::StatusCode, body: &str) -> String {
    match status.as_u16() {
        401 => format!("Authentication failed (401). Please check your {} API key", provider),
        403 => "Access forbidden (403). Your API key may not have permission for this endpoint".to_string(),
        429 => "Rate limit exceeded (429). Please try again later".to_string(),
        500..=599 => format!("Server error ({}). The API service is experiencing issues", status),
        _ => format!("API request failed ({}): {}", status, body),
    }
}
