//! # Agent Router
//!
//! An HTTP service that answers natural-language queries by letting a
//! reasoning model pick one of a small set of tools (weather lookup,
//! arithmetic, general answers) in a ReAct loop, then reporting which tool
//! answered and what it said.
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use agent_router::{AppState, Config};
//! use agent_router::agents::report;
//!
//! let state = AppState::from_config(Config::load("agent-router.toml")?)?;
//! let response = report("What is 42 * 7?", state.agent.stream("What is 42 * 7?")).await;
//! assert_eq!(response.tool_used.as_str(), "math");
//! ```
//!
//! ## Modules
//!
//! - [`agents`] - Prompt, parser, reasoning loop and result reporter
//! - [`api`] - REST API handlers and routes
//! - [`cli`] - Command-line interface
//! - [`llm`] - Chat-completion client abstraction
//! - [`tools`] - Tool trait, registry and the built-in tools
//! - [`types`] - Common types and error handling
//! - [`utils`] - Configuration and logging

#![warn(rustdoc::missing_crate_level_docs)]

/// ReAct agent and result reporting.
pub mod agents;
/// HTTP API handlers and routes.
pub mod api;
/// Command-line interface.
pub mod cli;
/// LLM client abstractions.
pub mod llm;
/// Built-in tools (weather, math, general answers).
pub mod tools;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration and logging utilities.
pub mod utils;

pub use agents::{AgentEvent, ReactAgent};
pub use llm::{create_client, LLMClient};
pub use tools::{Tool, ToolRegistry};
pub use types::{AppError, QueryRequest, QueryResponse, Result, ToolOutput, ToolUsed};
pub use utils::Config;

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub agent: Arc<ReactAgent>,
}

impl AppState {
    pub fn new(config: Arc<Config>, agent: Arc<ReactAgent>) -> Self {
        Self { config, agent }
    }

    /// Build the default tools and agent using the configured model endpoints.
    pub fn from_config(config: Config) -> Result<Self> {
        let agent_llm = create_client(&config.agent.model, config.keys.agent.clone());
        let tool_llm = create_client(&config.llm_tool, config.keys.llm_tool.clone());
        Self::with_clients(config, agent_llm, tool_llm)
    }

    /// Like [`AppState::from_config`] with explicit clients for the reasoning
    /// model and for `LLMTool`.
    pub fn with_clients(
        config: Config,
        agent_llm: Arc<dyn LLMClient>,
        tool_llm: Arc<dyn LLMClient>,
    ) -> Result<Self> {
        let tools = ToolRegistry::with_default_tools(&config, tool_llm)?;
        let agent = ReactAgent::new(agent_llm, Arc::new(tools), config.agent.max_iterations);
        Ok(Self::new(Arc::new(config), Arc::new(agent)))
    }
}
