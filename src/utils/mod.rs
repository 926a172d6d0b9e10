//! Configuration utilities.

/// TOML + environment configuration.
pub mod config;
/// Tracing subscriber setup.
pub mod logging;

pub use config::{ApiKeys, Config};
