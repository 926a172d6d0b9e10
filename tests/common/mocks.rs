//! Mock LLM clients shared across integration tests.

use agent_router::llm::LLMClient;
use agent_router::types::{AppError, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays a fixed script of model turns, one per `generate` call.
///
/// Once the script is exhausted every further call fails, which lets tests
/// exercise the reporter's error path.
pub struct ScriptedLLMClient {
    turns: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedLLMClient {
    pub fn new(turns: &[&str]) -> Self {
        Self {
            turns: Mutex::new(turns.iter().map(|t| t.to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMClient for ScriptedLLMClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.turns
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| AppError::LLM("Mock script exhausted".to_string()))
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// Always answers with the same text.
pub struct FixedLLMClient(pub &'static str);

#[async_trait]
impl LLMClient for FixedLLMClient {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Ok(self.0.to_string())
    }

    fn model_name(&self) -> &str {
        "fixed"
    }
}

/// Always fails.
pub struct FailingLLMClient;

#[async_trait]
impl LLMClient for FailingLLMClient {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(AppError::LLM("Mock LLM failure".to_string()))
    }

    fn model_name(&self) -> &str {
        "failing"
    }
}
