//! Built-in Tools for the Reasoning Loop
//!
//! Each tool takes a single string input and returns a [`ToolOutput`](crate::types::ToolOutput).
//! Tools never propagate errors: failures are reported as descriptive text so
//! the reasoning loop can observe them and carry on.
//!
//! # Available Tools
//!
//! | Name | Module | Input |
//! |------|--------|-------|
//! | `WeatherTool` | [`weather`] | a location, e.g. `Paris` |
//! | `MathTool` | [`calculator`] | `number operator number`, e.g. `42 * 7` |
//! | `LLMTool` | [`llm`] | any natural-language prompt |
//!
//! # Tool Registry
//!
//! ```ignore
//! let registry = ToolRegistry::with_default_tools(&config, llm_client)?;
//! let result = registry.execute("MathTool", "10 / 4").await?;  // 2.5
//! ```

/// Arithmetic evaluator (`MathTool`).
pub mod calculator;
/// General answer generator (`LLMTool`).
pub mod llm;
/// Tool registry for managing available tools.
pub mod registry;
/// Weather lookup (`WeatherTool`).
pub mod weather;

pub use registry::{Tool, ToolRegistry};
