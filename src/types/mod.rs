use serde::{Deserialize, Serialize};
use std::fmt;

// ============= API Request/Response Types =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

/// Structured response emitted once per query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub query: String,
    pub tool_used: ToolUsed,
    pub result: ToolOutput,
}

/// Public tag naming the capability that answered a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolUsed {
    Weather,
    Math,
    #[default]
    Llm,
}

impl ToolUsed {
    /// Map a registered tool name to its public tag.
    pub fn from_tool_name(name: &str) -> Option<Self> {
        match name {
            "WeatherTool" => Some(ToolUsed::Weather),
            "MathTool" => Some(ToolUsed::Math),
            "LLMTool" => Some(ToolUsed::Llm),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolUsed::Weather => "weather",
            ToolUsed::Math => "math",
            ToolUsed::Llm => "llm",
        }
    }
}

impl fmt::Display for ToolUsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============= Tool Types =============

/// Value produced by a tool: a number for arithmetic, text for everything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolOutput {
    Integer(i128),
    Float(f64),
    Text(String),
}

// 2^127; `i128::MAX as f64` rounds up to this, so the bound must be strict.
const I128_LIMIT: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

impl ToolOutput {
    /// Integer when `value` has no fractional part and fits in an `i128`, else float.
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() && value.fract() == 0.0 && (-I128_LIMIT..I128_LIMIT).contains(&value)
        {
            ToolOutput::Integer(value as i128)
        } else {
            ToolOutput::Float(value)
        }
    }

    /// Interpret a bare numeric literal as a number, anything else as text.
    pub fn from_answer(text: &str) -> Self {
        let trimmed = text.trim();
        if let Ok(n) = trimmed.parse::<i128>() {
            return ToolOutput::Integer(n);
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() && looks_numeric(trimmed) => ToolOutput::from_f64(n),
            _ => ToolOutput::Text(text.to_string()),
        }
    }
}

// `f64::from_str` also accepts words like "infinity" and "NaN".
fn looks_numeric(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
}

impl fmt::Display for ToolOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolOutput::Integer(n) => write!(f, "{}", n),
            ToolOutput::Float(n) => write!(f, "{}", n),
            ToolOutput::Text(s) => f.write_str(s),
        }
    }
}

impl From<String> for ToolOutput {
    fn from(value: String) -> Self {
        ToolOutput::Text(value)
    }
}

impl From<&str> for ToolOutput {
    fn from(value: &str) -> Self {
        ToolOutput::Text(value.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("LLM error: {0}")]
    LLM(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Agent could not determine an answer within {0} iterations")]
    IterationLimit(usize),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::NotFound(_) => axum::http::StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => axum::http::StatusCode::BAD_REQUEST,
            AppError::LLM(_)
            | AppError::Configuration(_)
            | AppError::IterationLimit(_)
            | AppError::Internal(_) => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match self {
            AppError::NotFound(msg) | AppError::InvalidInput(msg) => msg,
            other => other.to_string(),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
