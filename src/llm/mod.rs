//! LLM Provider Clients
//!
//! The reasoning loop and the general-answer tool both need a language model.
//! They share the [`LLMClient`] trait; the only built-in implementation is
//! [`OpenAIClient`](openai::OpenAIClient), which speaks the OpenAI chat
//! completions protocol and therefore also covers Gemini's compatibility
//! endpoint and self-hosted servers.
//!
//! # Example
//!
//! ```ignore
//! use agent_router::llm::create_client;
//! use agent_router::utils::config::ModelConfig;
//!
//! let client = create_client(&ModelConfig::default(), Some(key));
//! let answer = client.generate("What is the capital of France?").await?;
//! ```

/// Core LLM client trait and constructor.
pub mod client;
/// OpenAI-compatible chat completions client.
pub mod openai;

pub use client::{create_client, LLMClient};
