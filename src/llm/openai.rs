use crate::llm::client::LLMClient;
use crate::types::{AppError, Result};
use crate::utils::config::ModelConfig;
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessage,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::debug;

/// Chat-completions client for any OpenAI-compatible API (OpenAI, Gemini, vLLM, ...).
pub struct OpenAIClient {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
    has_key: bool,
    api_key_env: String,
}

impl OpenAIClient {
    /// `api_key_env` names the variable the key comes from, for error messages.
    pub fn new(
        api_key: Option<String>,
        api_key_env: impl Into<String>,
        api_base: String,
        model: String,
        temperature: f32,
    ) -> Self {
        let has_key = api_key.is_some();
        let config = OpenAIConfig::new()
            .with_api_key(api_key.unwrap_or_default())
            .with_api_base(api_base);

        Self {
            client: Client::with_config(config),
            model,
            temperature,
            has_key,
            api_key_env: api_key_env.into(),
        }
    }

    pub fn from_config(config: &ModelConfig, api_key: Option<String>) -> Self {
        Self::new(
            api_key,
            config.api_key_env.as_str(),
            config.api_base.clone(),
            config.model.clone(),
            config.temperature,
        )
    }
}

#[async_trait]
impl LLMClient for OpenAIClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        if !self.has_key {
            return Err(AppError::Configuration(format!(
                "{} not configured for model '{}'",
                self.api_key_env, self.model
            )));
        }

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessage::from(prompt),
            )])
            .temperature(self.temperature)
            .build()
            .map_err(|e| AppError::LLM(format!("Failed to build request: {}", e)))?;

        debug!(model = %self.model, prompt_len = prompt.len(), "Chat completion request");

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| AppError::LLM(format!("OpenAI API error: {}", e)))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::LLM(format!("No response from {}", self.model)))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
