use crate::llm::LLMClient;
use crate::tools::{calculator::MathTool, llm::LLMTool, weather::WeatherTool};
use crate::types::{AppError, Result, ToolDefinition, ToolOutput};
use crate::utils::config::Config;
use async_trait::async_trait;
use std::sync::Arc;

/// A named capability the reasoning loop can invoke with a string input.
///
/// Tools never fail past their boundary: provider, network and input errors
/// come back as [`ToolOutput::Text`] describing the problem.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    /// Routing description shown to the reasoning model.
    fn description(&self) -> &str;
    async fn execute(&self, input: &str) -> ToolOutput;
}

/// Tools in registration order.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Create a registry with the weather, math and LLM tools.
    pub fn with_default_tools(config: &Config, llm: Arc<dyn LLMClient>) -> Result<Self> {
        let mut registry = Self::new();

        registry.register(Arc::new(WeatherTool::new(
            &config.weather,
            config.keys.weather.clone(),
        )?));
        registry.register(Arc::new(MathTool));
        registry.register(Arc::new(LLMTool::new(
            llm,
            config.keys.llm_tool.is_some(),
            &config.llm_tool.api_key_env,
        )));

        Ok(registry)
    }

    /// Register a tool, replacing any tool with the same name in place.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        match self.tools.iter().position(|t| t.name() == tool.name()) {
            Some(idx) => self.tools[idx] = tool,
            None => self.tools.push(tool),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    pub fn get_tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|tool| ToolDefinition {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
            })
            .collect()
    }

    /// `name: description` lines for the reasoning prompt.
    pub fn render_descriptions(&self) -> String {
        self.tools
            .iter()
            .map(|t| format!("{}: {}", t.name(), t.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub async fn execute(&self, name: &str, input: &str) -> Result<ToolOutput> {
        if let Some(tool) = self.get(name) {
            Ok(tool.execute(input).await)
        } else {
            Err(AppError::NotFound(format!("Tool not found: {}", name)))
        }
    }

    /// Get a list of all registered tool names
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.name().to_string()).collect()
    }

    /// Check if a tool is registered
    pub fn has_tool(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
