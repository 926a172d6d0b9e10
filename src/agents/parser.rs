//! ReAct output parser
//!
//! The reasoning model answers in a line-oriented format:
//!
//! ```text
//! Thought: I need to compute this
//! Action: MathTool
//! Action Input: 42 * 7
//! ```
//!
//! or, once it is done:
//!
//! ```text
//! Thought: I now know the final answer
//! Final Answer: 294
//! ```
//!
//! [`parse`] reads that grammar line by line. Each line either opens a
//! section with one of the labels below or continues the current section;
//! text before the first label belongs to the implicit leading `Thought:`
//! (the prompt ends with `Thought:`). Anything from an `Observation:` line
//! onwards is discarded, since observations are supplied by the loop, not
//! the model. `Final Answer:` swallows the rest of the text verbatim.

use serde::Serialize;

const THOUGHT: &str = "Thought:";
const ACTION: &str = "Action:";
const ACTION_INPUT: &str = "Action Input:";
const OBSERVATION: &str = "Observation:";
const FINAL_ANSWER: &str = "Final Answer:";

/// A tool invocation chosen by the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentAction {
    pub tool: String,
    pub tool_input: String,
    /// Model text that produced this action, replayed in the scratchpad.
    pub log: String,
}

/// Terminal answer produced by the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentFinish {
    pub output: String,
    pub log: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid Format: Missing 'Action:' after 'Thought:'")]
    MissingAction,

    #[error("Invalid Format: Missing 'Action Input:' after 'Action:'")]
    MissingActionInput,

    #[error("Parsing LLM output produced both a final answer and a parse-able action")]
    ActionAndFinalAnswer,
}

/// Result of parsing one model turn.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentOutcome {
    Action(AgentAction),
    Finish(AgentFinish),
    ParseError { error: ParseError, log: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    Thought,
    Action,
    ActionInput,
    FinalAnswer,
}

/// Split a line into its label (if any) and the remaining content.
fn split_label(line: &str) -> Option<(Label, &str)> {
    let trimmed = line.trim_start();
    // "Action Input:" must be tested before "Action:".
    [
        (ACTION_INPUT, Label::ActionInput),
        (ACTION, Label::Action),
        (FINAL_ANSWER, Label::FinalAnswer),
        (THOUGHT, Label::Thought),
    ]
    .into_iter()
    .find_map(|(prefix, label)| trimmed.strip_prefix(prefix).map(|rest| (label, rest)))
}

fn is_observation(line: &str) -> bool {
    line.trim_start().starts_with(OBSERVATION)
}

/// Model text up to (not including) the first `Observation:` line.
fn truncate_at_observation(text: &str) -> &str {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if is_observation(line) {
            return text[..offset].trim_end();
        }
        offset += line.len();
    }
    text.trim_end()
}

struct Sections {
    action: Option<String>,
    action_input: Option<String>,
    final_answer: Option<String>,
}

fn collect_sections(text: &str) -> Sections {
    let mut sections = Sections {
        action: None,
        action_input: None,
        final_answer: None,
    };
    let mut current = Label::Thought;
    let mut lines = text.lines();

    while let Some(line) = lines.next() {
        match split_label(line) {
            Some((Label::FinalAnswer, rest)) => {
                let mut answer = rest.to_string();
                for tail in lines.by_ref() {
                    answer.push('\n');
                    answer.push_str(tail);
                }
                sections.final_answer = Some(answer.trim().to_string());
                break;
            }
            Some((Label::Action, rest)) => {
                current = Label::Action;
                if sections.action.is_none() {
                    sections.action = Some(rest.trim().to_string());
                }
            }
            Some((Label::ActionInput, rest)) => {
                current = Label::ActionInput;
                if sections.action.is_some() && sections.action_input.is_none() {
                    sections.action_input = Some(rest.to_string());
                }
            }
            Some((Label::Thought, _)) => current = Label::Thought,
            None => {
                // Continuation lines only matter for a multi-line Action Input.
                if current == Label::ActionInput {
                    if let Some(input) = sections.action_input.as_mut() {
                        input.push('\n');
                        input.push_str(line);
                    }
                }
            }
        }
    }

    sections
}

fn clean_input(raw: &str) -> String {
    raw.trim().trim_matches('"').to_string()
}

/// Parse one model turn into an action, a final answer or a parse error.
pub fn parse(text: &str) -> AgentOutcome {
    let log = truncate_at_observation(text);
    let sections = collect_sections(log);
    let log = log.to_string();

    let action = sections.action.filter(|name| !name.is_empty());

    match (action, sections.action_input, sections.final_answer) {
        (Some(_), Some(_), Some(_)) => AgentOutcome::ParseError {
            error: ParseError::ActionAndFinalAnswer,
            log,
        },
        (Some(tool), Some(input), None) => AgentOutcome::Action(AgentAction {
            tool,
            tool_input: clean_input(&input),
            log,
        }),
        (_, _, Some(output)) => AgentOutcome::Finish(AgentFinish { output, log }),
        (None, _, None) => AgentOutcome::ParseError {
            error: ParseError::MissingAction,
            log,
        },
        (Some(_), None, None) => AgentOutcome::ParseError {
            error: ParseError::MissingActionInput,
            log,
        },
    }
}
