//! Weather lookup tool backed by an OpenWeatherMap-compatible API.

use crate::tools::registry::Tool;
use crate::types::{AppError, Result, ToolOutput};
use crate::utils::config::WeatherConfig;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Weather API key not configured. Please set {0} in your environment.")]
    MissingKey(String),

    #[error("Could not retrieve weather for {location}: {message}")]
    Provider { location: String, message: String },

    #[error("Error fetching weather for {location}: A network error occurred: {source}")]
    Network {
        location: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("An unexpected error occurred while processing weather data: {0}")]
    Unexpected(String),
}

/// `WeatherTool`: current conditions for a named location.
pub struct WeatherTool {
    client: reqwest::Client,
    base_url: String,
    units: String,
    default_location: String,
    api_key: Option<String>,
    api_key_env: String,
}

impl WeatherTool {
    pub fn new(config: &WeatherConfig, api_key: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            units: config.units.clone(),
            default_location: config.default_location.clone(),
            api_key,
            api_key_env: config.api_key_env.clone(),
        })
    }

    /// Normalize tool input into a location, falling back to the default.
    fn location<'a>(&'a self, input: &'a str) -> &'a str {
        let trimmed = input.trim().trim_matches(|c| c == '"' || c == '\'').trim();
        if trimmed.is_empty() {
            self.default_location.as_str()
        } else {
            trimmed
        }
    }

    /// Fetch and format the current weather for `location`.
    ///
    /// Request URLs are stripped from network errors since they carry the API key.
    pub async fn fetch(&self, location: &str) -> std::result::Result<String, WeatherError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| WeatherError::MissingKey(self.api_key_env.clone()))?;

        debug!(location, url = %self.base_url, "Fetching weather");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", location),
                ("appid", api_key),
                ("units", self.units.as_str()),
            ])
            .send()
            .await
            .map_err(|source| WeatherError::Network {
                location: location.to_string(),
                source: source.without_url(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| WeatherError::Network {
            location: location.to_string(),
            source: source.without_url(),
        })?;

        let data: Value = match serde_json::from_str(&body) {
            Ok(data) => data,
            Err(_) if !status.is_success() => {
                return Err(WeatherError::Provider {
                    location: location.to_string(),
                    message: format!("HTTP {}", status),
                })
            }
            Err(e) => return Err(WeatherError::Unexpected(e.to_string())),
        };

        if !status.is_success() || !is_ok_code(&data) {
            return Err(WeatherError::Provider {
                location: location.to_string(),
                message: data
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("Unknown error from API")
                    .to_string(),
            });
        }

        Ok(format_report(&data))
    }
}

/// OpenWeatherMap reports `cod` as either a number or a string.
fn is_ok_code(data: &Value) -> bool {
    match data.get("cod") {
        Some(Value::Number(n)) => n.as_u64() == Some(200),
        Some(Value::String(s)) => s == "200",
        _ => false,
    }
}

fn display_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "None".to_string(),
        Some(other) => other.to_string(),
    }
}

fn format_report(data: &Value) -> String {
    let description = data
        .get("weather")
        .and_then(|w| w.get(0))
        .and_then(|w| w.get("description"))
        .and_then(Value::as_str)
        .unwrap_or("unknown");
    let temperature = data.get("main").and_then(|m| m.get("temp"));
    let city = display_field(data.get("name"));
    let country = display_field(data.get("sys").and_then(|s| s.get("country")));

    match temperature {
        Some(temp) if !temp.is_null() => {
            format!("It's {}°C and {} in {}, {}.", temp, description, city, country)
        }
        _ => format!(
            "Weather data available for {}, {}, but temperature is missing.",
            city, country
        ),
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "WeatherTool"
    }

    fn description(&self) -> &str {
        "Fetches current weather information for a given location. Input should be a string representing the location, e.g., 'London' or 'Paris'. Use this tool when the user asks about weather or climate."
    }

    async fn execute(&self, input: &str) -> ToolOutput {
        let location = self.location(input).to_string();
        match self.fetch(&location).await {
            Ok(report) => ToolOutput::Text(report),
            Err(e) => {
                warn!(location = %location, error = %e, "Weather lookup failed");
                ToolOutput::Text(e.to_string())
            }
        }
    }
}
