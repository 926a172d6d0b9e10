//! LLM client abstraction
//!
//! Both the reasoning loop and `LLMTool` talk to a language model through
//! [`LLMClient`], so tests can swap in scripted clients and deployments can
//! point either role at any OpenAI-compatible endpoint.

use crate::llm::openai::OpenAIClient;
use crate::types::Result;
use crate::utils::config::ModelConfig;
use async_trait::async_trait;
use std::sync::Arc;

/// Generic LLM client trait for provider abstraction
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Generate a completion for a single user prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Get the model name/identifier
    fn model_name(&self) -> &str;
}

/// Build the client described by `config`.
///
/// A missing key does not fail here: the client reports a configuration
/// error on first use so the process still starts without credentials.
pub fn create_client(config: &ModelConfig, api_key: Option<String>) -> Arc<dyn LLMClient> {
    Arc::new(OpenAIClient::from_config(config, api_key))
}
