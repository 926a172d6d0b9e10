use crate::tools::registry::Tool;
use crate::types::ToolOutput;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    fn parse(token: &str) -> Option<Self> {
        match token {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Subtract),
            "*" => Some(Operator::Multiply),
            "/" => Some(Operator::Divide),
            _ => None,
        }
    }

    fn apply(self, a: f64, b: f64) -> Result<f64, MathError> {
        match self {
            Operator::Add => Ok(a + b),
            Operator::Subtract => Ok(a - b),
            Operator::Multiply => Ok(a * b),
            Operator::Divide if b == 0.0 => Err(MathError::DivisionByZero),
            Operator::Divide => Ok(a / b),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MathError {
    #[error("Invalid math expression format. Expected 'number operator number' (e.g., '42 * 7').")]
    InvalidFormat,

    #[error("Invalid numbers in expression. Please ensure numbers are valid (e.g., '10', '5.5').")]
    InvalidNumber,

    #[error("Unsupported operator: '{0}'. Only +, -, *, / are supported.")]
    UnsupportedOperator(String),

    #[error("Division by zero is not allowed.")]
    DivisionByZero,

    #[error("Math evaluation produced a non-finite result.")]
    NonFinite,
}

fn parse_number(token: &str) -> Result<f64, MathError> {
    token
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or(MathError::InvalidNumber)
}

/// Evaluate `number operator number`, returning an integer for whole results.
pub fn evaluate(expression: &str) -> Result<ToolOutput, MathError> {
    let parts: Vec<&str> = expression.split_whitespace().collect();
    let [lhs, op, rhs] = parts.as_slice() else {
        return Err(MathError::InvalidFormat);
    };

    let a = parse_number(lhs)?;
    let b = parse_number(rhs)?;
    let operator =
        Operator::parse(op).ok_or_else(|| MathError::UnsupportedOperator(op.to_string()))?;

    let result = operator.apply(a, b)?;
    if !result.is_finite() {
        return Err(MathError::NonFinite);
    }

    Ok(ToolOutput::from_f64(result))
}

/// `MathTool`: binary arithmetic over `+ - * /`.
pub struct MathTool;

#[async_trait]
impl Tool for MathTool {
    fn name(&self) -> &str {
        "MathTool"
    }

    fn description(&self) -> &str {
        "Performs a basic math operation on a simple arithmetic expression. Input should be a string representing a simple expression like '42 * 7', '10 + 5', '20 / 4'. Use this tool when the user asks for a calculation."
    }

    async fn execute(&self, input: &str) -> ToolOutput {
        match evaluate(input) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(input, error = %e, "Math evaluation failed");
                ToolOutput::Text(e.to_string())
            }
        }
    }
}
