#![allow(dead_code)]

pub mod mocks;

use agent_router::{AppState, Config, LLMClient};
use std::sync::Arc;

/// Default configuration with no API keys resolved.
pub fn test_config() -> Config {
    Config::default()
}

/// App state whose reasoning model and `LLMTool` model are both `llm`.
pub fn state_with(llm: Arc<dyn LLMClient>) -> AppState {
    AppState::with_clients(test_config(), llm.clone(), llm).unwrap()
}
