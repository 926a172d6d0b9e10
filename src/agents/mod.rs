//! ReAct agent: prompt rendering, output parsing, the reasoning loop and the
//! reducer that turns a run into a [`QueryResponse`](crate::types::QueryResponse).

/// Line-grammar parser for model turns.
pub mod parser;
/// Prompt template and scratchpad rendering.
pub mod prompt;
/// The reason-act-observe loop.
pub mod react;
/// Event stream reducer.
pub mod reporter;

pub use parser::{AgentAction, AgentFinish, AgentOutcome, ParseError};
pub use react::{AgentEvent, ReactAgent};
pub use reporter::{report, RunReducer};
