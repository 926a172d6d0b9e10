use crate::llm::LLMClient;
use crate::tools::registry::Tool;
use crate::types::ToolOutput;
use async_trait::async_trait;
use std::sync::Arc;

/// `LLMTool`: answers open-ended questions with a single model call.
pub struct LLMTool {
    llm: Arc<dyn LLMClient>,
    configured: bool,
    api_key_env: String,
}

impl LLMTool {
    /// `configured` is false when the model's API key is missing; the tool
    /// then answers with a configuration notice instead of calling out.
    pub fn new(llm: Arc<dyn LLMClient>, configured: bool, api_key_env: &str) -> Self {
        Self {
            llm,
            configured,
            api_key_env: api_key_env.to_string(),
        }
    }
}

#[async_trait]
impl Tool for LLMTool {
    fn name(&self) -> &str {
        "LLMTool"
    }

    fn description(&self) -> &str {
        "Answers general or open-ended questions using a language model. Use this tool for any question that is not specifically about weather or math, or when other tools cannot answer."
    }

    async fn execute(&self, input: &str) -> ToolOutput {
        if !self.configured {
            return ToolOutput::Text(format!(
                "Language model API key not configured for LLM. Please set {} in your environment.",
                self.api_key_env
            ));
        }

        match self.llm.generate(input).await {
            Ok(text) => ToolOutput::Text(text),
            Err(e) => {
                tracing::warn!(model = self.llm.model_name(), error = %e, "LLMTool call failed");
                ToolOutput::Text(format!("Error getting LLM response: {}", e))
            }
        }
    }
}
