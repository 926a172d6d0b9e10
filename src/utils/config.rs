//! Configuration for the agent router
//!
//! Settings come from an optional TOML file (`agent-router.toml`) layered with
//! environment variables. API keys are never written in the file: each section
//! names the environment variable that holds its key, and the key is resolved
//! once when the configuration is loaded.

use crate::types::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Root configuration structure loaded from agent-router.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    /// Reasoning model driving the ReAct loop
    #[serde(default)]
    pub agent: AgentConfig,

    /// Model answering general questions through `LLMTool`
    #[serde(default)]
    pub llm_tool: ModelConfig,

    #[serde(default)]
    pub weather: WeatherConfig,

    /// Keys resolved from the environment at load time
    #[serde(skip)]
    pub keys: ApiKeys,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// "pretty" or "json"
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

// ============= Model Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Base URL of an OpenAI-compatible chat completions API
    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default)]
    pub temperature: f32,

    /// Environment variable containing the API key
    #[serde(default = "default_llm_key_env")]
    pub api_key_env: String,
}

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta/openai".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_llm_key_env() -> String {
    "GOOGLE_API_KEY".to_string()
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            model: default_model(),
            temperature: 0.0,
            api_key_env: default_llm_key_env(),
        }
    }
}

// ============= Agent Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(flatten)]
    pub model: ModelConfig,

    /// Maximum think/act/observe cycles before the run is abandoned
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

fn default_max_iterations() -> usize {
    15
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            max_iterations: default_max_iterations(),
        }
    }
}

// ============= Weather Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    #[serde(default = "default_weather_url")]
    pub base_url: String,

    #[serde(default = "default_weather_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_units")]
    pub units: String,

    #[serde(default = "default_location")]
    pub default_location: String,

    #[serde(default = "default_weather_timeout")]
    pub timeout_secs: u64,
}

fn default_weather_url() -> String {
    "http://api.openweathermap.org/data/2.5/weather".to_string()
}

fn default_weather_key_env() -> String {
    "OPENWEATHER_API_KEY".to_string()
}

fn default_units() -> String {
    "metric".to_string()
}

fn default_location() -> String {
    "Chicago".to_string()
}

fn default_weather_timeout() -> u64 {
    30
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_url(),
            api_key_env: default_weather_key_env(),
            units: default_units(),
            default_location: default_location(),
            timeout_secs: default_weather_timeout(),
        }
    }
}

// ============= API Keys =============

/// API keys resolved from the environment. `None` means absent or placeholder.
#[derive(Clone, Default)]
pub struct ApiKeys {
    pub agent: Option<String>,
    pub llm_tool: Option<String>,
    pub weather: Option<String>,
}

impl std::fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mask = |k: &Option<String>| if k.is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("ApiKeys")
            .field("agent", &mask(&self.agent))
            .field("llm_tool", &mask(&self.llm_tool))
            .field("weather", &mask(&self.weather))
            .finish()
    }
}

/// Treat empty values and `YOUR_..._API_KEY` style templates as unset.
pub fn is_placeholder_key(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || (value.starts_with("YOUR_") && value.ends_with("_KEY"))
}

/// Read an API key from `var`, discarding placeholders.
pub fn resolve_api_key(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .filter(|v| !is_placeholder_key(v))
        .map(|v| v.trim().to_string())
}

impl Config {
    /// Load configuration from `path` (when it exists), `.env` and the environment.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let path = path.as_ref();
        let mut config = if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                AppError::Configuration(format!("Failed to read {}: {}", path.display(), e))
            })?;
            Self::from_toml(&content)?
        } else {
            Self::default()
        };

        config.apply_env_overrides()?;
        config.resolve_keys();
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text without touching the environment.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| AppError::Configuration(format!("Invalid configuration: {}", e)))
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(host) = env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| AppError::Configuration(format!("Invalid PORT value: {}", port)))?;
        }
        Ok(())
    }

    /// Resolve API keys from the environment variables named in each section.
    pub fn resolve_keys(&mut self) {
        self.keys = ApiKeys {
            agent: resolve_api_key(&self.agent.model.api_key_env),
            llm_tool: resolve_api_key(&self.llm_tool.api_key_env),
            weather: resolve_api_key(&self.weather.api_key_env),
        };
    }

    pub fn validate(&self) -> Result<()> {
        if self.agent.max_iterations == 0 {
            return Err(AppError::Configuration(
                "agent.max_iterations must be at least 1".to_string(),
            ));
        }
        if self.server.port == 0 {
            return Err(AppError::Configuration(
                "server.port must be non-zero".to_string(),
            ));
        }
        if self.agent.model.model.trim().is_empty() || self.llm_tool.model.trim().is_empty() {
            return Err(AppError::Configuration(
                "model names must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Socket address the server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.agent.max_iterations, 15);
        assert_eq!(config.agent.model.temperature, 0.0);
        assert_eq!(config.weather.default_location, "Chicago");
        assert_eq!(config.weather.units, "metric");
        assert_eq!(config.weather.api_key_env, "OPENWEATHER_API_KEY");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = Config::from_toml(
            r#"
            [server]
            port = 9000

            [agent]
            model = "gpt-4o-mini"
            api_base = "https://api.openai.com/v1"
            api_key_env = "OPENAI_API_KEY"
            max_iterations = 5

            [weather]
            default_location = "Paris"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.agent.model.model, "gpt-4o-mini");
        assert_eq!(config.agent.model.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.agent.max_iterations, 5);
        assert_eq!(config.llm_tool.model, "gemini-2.5-flash");
        assert_eq!(config.weather.default_location, "Paris");
    }

    #[test]
    fn test_invalid_toml_is_configuration_error() {
        let err = Config::from_toml("[server\nport = ").unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn test_validate_rejects_zero_iterations() {
        let mut config = Config::default();
        config.agent.max_iterations = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_placeholder_keys() {
        assert!(is_placeholder_key(""));
        assert!(is_placeholder_key("   "));
        assert!(is_placeholder_key("YOUR_GOOGLE_API_KEY"));
        assert!(is_placeholder_key("YOUR_OPENWEATHER_API_KEY"));
        assert!(!is_placeholder_key("abc123"));
    }

    #[test]
    fn test_resolve_missing_key() {
        assert_eq!(resolve_api_key("AGENT_ROUTER_TEST_SURELY_UNSET_VAR"), None);
    }

    #[test]
    fn test_api_keys_debug_masks_values() {
        let keys = ApiKeys {
            agent: Some("secret".to_string()),
            llm_tool: None,
            weather: None,
        };
        let rendered = format!("{:?}", keys);
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<set>"));
    }
}
