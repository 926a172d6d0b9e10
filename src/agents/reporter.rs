//! Folds an agent event stream into the single [`QueryResponse`] a client sees.
//!
//! `tool_used` is decided by the first action event and never changes
//! afterwards. An unknown tool name in that action maps to `llm`. Malformed
//! turns are not actions, so they leave it unset.

use crate::agents::react::AgentEvent;
use crate::types::{AppError, QueryResponse, Result, ToolOutput, ToolUsed};
use futures::{Stream, StreamExt};
use std::ops::ControlFlow;
use tracing::error;

pub const NO_RESPONSE_MESSAGE: &str = "An unexpected error occurred or no response from agent.";

#[derive(Debug, Default)]
pub struct RunReducer {
    tool_used: Option<ToolUsed>,
    result: Option<ToolOutput>,
}

impl RunReducer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event. Returns `Break` once the answer is known.
    pub fn apply(&mut self, event: &AgentEvent) -> ControlFlow<()> {
        match event {
            AgentEvent::Action(action) => {
                if self.tool_used.is_none() {
                    self.tool_used =
                        Some(ToolUsed::from_tool_name(&action.tool).unwrap_or_default());
                }
                ControlFlow::Continue(())
            }
            AgentEvent::Finish(finish) => {
                self.result = Some(ToolOutput::from_answer(&finish.output));
                ControlFlow::Break(())
            }
            AgentEvent::Observation { .. } | AgentEvent::ParseError { .. } => {
                ControlFlow::Continue(())
            }
        }
    }

    /// Record a failed run. The error becomes the result and the model is blamed.
    pub fn fail(&mut self, err: &AppError) {
        self.tool_used = Some(ToolUsed::Llm);
        self.result = Some(ToolOutput::Text(format!(
            "An error occurred during agent execution: {}",
            err
        )));
    }

    pub fn into_response(self, query: &str) -> QueryResponse {
        QueryResponse {
            query: query.to_string(),
            tool_used: self.tool_used.unwrap_or_default(),
            result: self
                .result
                .unwrap_or_else(|| ToolOutput::Text(NO_RESPONSE_MESSAGE.to_string())),
        }
    }
}

/// Consume `events` until an answer or an error and build the response.
pub async fn report<S>(query: &str, events: S) -> QueryResponse
where
    S: Stream<Item = Result<AgentEvent>>,
{
    futures::pin_mut!(events);
    let mut reducer = RunReducer::new();

    while let Some(event) = events.next().await {
        match event {
            Ok(event) => {
                if reducer.apply(&event).is_break() {
                    break;
                }
            }
            Err(e) => {
                error!(query, error = %e, "Agent execution failed");
                reducer.fail(&e);
                break;
            }
        }
    }

    reducer.into_response(query)
}
