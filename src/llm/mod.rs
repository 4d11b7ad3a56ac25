//! LLM integration for mail-sorter.
//!
//! The relay only needs single-shot chat completions, so the seam is one
//! trait (`LlmProvider`) with an OpenAI-compatible implementation behind it.
//! Tests swap in stub providers or point the real one at a local server.

mod openai;
pub mod provider;

pub use openai::OpenAiProvider;
pub use provider::*;

use std::sync::Arc;

use secrecy::SecretString;

/// Default base URL for OpenAI's API.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Configuration for creating an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: SecretString,
    pub model: String,
    pub base_url: String,
}

/// Create an LLM provider from configuration.
pub fn create_provider(config: &LlmConfig) -> Arc<dyn LlmProvider> {
    tracing::info!(model = %config.model, base_url = %config.base_url, "Using OpenAI-compatible provider");
    Arc::new(OpenAiProvider::new(
        config.base_url.clone(),
        config.api_key.clone(),
        config.model.clone(),
    ))
}
