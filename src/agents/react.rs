use crate::agents::parser::{self, AgentAction, AgentFinish, AgentOutcome, ParseError};
use crate::agents::prompt::{self, Step};
use crate::llm::LLMClient;
use crate::tools::ToolRegistry;
use crate::types::{AppError, Result, ToolOutput};
use futures::{Stream, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Tool name recorded in the scratchpad for turns the parser rejected.
const PARSE_ERROR_TOOL: &str = "_Exception";

/// Events emitted by [`ReactAgent::stream`], in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentEvent {
    /// The model picked a tool.
    Action(AgentAction),
    /// The tool (or the loop, for unknown tools) answered.
    Observation {
        action: AgentAction,
        observation: ToolOutput,
    },
    /// The model's output did not follow the expected format.
    ParseError { error: String, log: String },
    /// The model produced its final answer.
    Finish(AgentFinish),
}

/// Reason-act-observe loop over a tool registry.
pub struct ReactAgent {
    llm: Arc<dyn LLMClient>,
    tools: Arc<ToolRegistry>,
    max_iterations: usize,
}

impl ReactAgent {
    pub fn new(llm: Arc<dyn LLMClient>, tools: Arc<ToolRegistry>, max_iterations: usize) -> Self {
        Self {
            llm,
            tools,
            max_iterations,
        }
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    async fn dispatch(&self, action: &AgentAction) -> ToolOutput {
        match self.tools.get(&action.tool) {
            Some(tool) => {
                debug!(tool = %action.tool, input = %action.tool_input, "Invoking tool");
                tool.execute(&action.tool_input).await
            }
            None => {
                warn!(tool = %action.tool, "Model selected an unknown tool");
                ToolOutput::Text(format!(
                    "{} is not a valid tool, try one of [{}].",
                    action.tool,
                    self.tools.tool_names().join(", ")
                ))
            }
        }
    }

    /// Run the loop for `query`, yielding events as they happen.
    ///
    /// The stream ends after a `Finish` event, or with a single `Err` when the
    /// model call fails or the iteration cap is reached.
    pub fn stream<'a>(
        &'a self,
        query: &'a str,
    ) -> impl Stream<Item = Result<AgentEvent>> + Send + 'a {
        async_stream::stream! {
            let mut steps: Vec<Step> = Vec::new();
            let mut finished = false;

            for iteration in 1..=self.max_iterations {
                let prompt = prompt::render(&self.tools, query, &steps);
                debug!(iteration, prompt_len = prompt.len(), "Reasoning step");

                let text = match self.llm.generate(&prompt).await {
                    Ok(text) => text,
                    Err(e) => {
                        yield Err(e);
                        finished = true;
                        break;
                    }
                };

                match parser::parse(&text) {
                    AgentOutcome::Finish(finish) => {
                        debug!(iteration, "Final answer reached");
                        yield Ok(AgentEvent::Finish(finish));
                        finished = true;
                        break;
                    }
                    AgentOutcome::Action(action) => {
                        yield Ok(AgentEvent::Action(action.clone()));
                        let observation = self.dispatch(&action).await;
                        yield Ok(AgentEvent::Observation {
                            action: action.clone(),
                            observation: observation.clone(),
                        });
                        steps.push(Step {
                            action,
                            observation: observation.to_string(),
                        });
                    }
                    AgentOutcome::ParseError { error, log } => {
                        warn!(iteration, error = %error, "Could not parse model output");
                        yield Ok(AgentEvent::ParseError {
                            error: error.to_string(),
                            log: log.clone(),
                        });
                        steps.push(parse_error_step(error, log));
                    }
                }
            }

            if !finished {
                yield Err(AppError::IterationLimit(self.max_iterations));
            }
        }
    }

    /// Run the loop to completion and return the final answer.
    pub async fn run(&self, query: &str) -> Result<AgentFinish> {
        let events = self.stream(query);
        futures::pin_mut!(events);
        while let Some(event) = events.next().await {
            if let AgentEvent::Finish(finish) = event? {
                return Ok(finish);
            }
        }
        Err(AppError::Internal("Agent stopped without an answer".to_string()))
    }
}

fn parse_error_step(error: ParseError, log: String) -> Step {
    Step {
        action: AgentAction {
            tool: PARSE_ERROR_TOOL.to_string(),
            tool_input: log.clone(),
            log,
        },
        observation: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::calculator::MathTool;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays canned model turns and records the prompts it saw.
    struct Scripted {
        turns: Mutex<VecDeque<String>>,
        prompts: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn new(turns: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                turns: Mutex::new(turns.iter().map(|t| t.to_string()).collect()),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LLMClient for Scripted {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.turns
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| AppError::LLM("script exhausted".to_string()))
        }

        fn model_name(&self) -> &str {
            "scripted"
        }
    }

    fn agent(llm: Arc<Scripted>, max_iterations: usize) -> ReactAgent {
        let mut tools = ToolRegistry::new();
        tools.register(Arc::new(MathTool));
        ReactAgent::new(llm, Arc::new(tools), max_iterations)
    }

    async fn collect(agent: &ReactAgent, query: &str) -> Vec<Result<AgentEvent>> {
        agent.stream(query).collect().await
    }

    #[tokio::test]
    async fn test_action_then_finish() {
        let llm = Scripted::new(&[
            " I need to add.\nAction: MathTool\nAction Input: 2 + 2",
            " I now know the final answer\nFinal Answer: 4",
        ]);
        let agent = agent(llm.clone(), 5);
        let events = collect(&agent, "What is 2 + 2?").await;

        assert_eq!(events.len(), 3);
        assert!(matches!(&events[0], Ok(AgentEvent::Action(a)) if a.tool == "MathTool"));
        assert!(matches!(
            &events[1],
            Ok(AgentEvent::Observation { observation: ToolOutput::Integer(4), .. })
        ));
        assert!(matches!(&events[2], Ok(AgentEvent::Finish(f)) if f.output == "4"));

        let prompts = llm.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[1].contains("Action Input: 2 + 2\nObservation: 4\nThought: "));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_observed() {
        let llm = Scripted::new(&[
            "Action: SearchTool\nAction Input: rust",
            "Final Answer: done",
        ]);
        let agent = agent(llm, 5);
        let events = collect(&agent, "search rust").await;

        match &events[1] {
            Ok(AgentEvent::Observation { observation, .. }) => assert_eq!(
                observation.to_string(),
                "SearchTool is not a valid tool, try one of [MathTool]."
            ),
            other => panic!("unexpected event {:?}", other),
        }
        assert!(matches!(events.last(), Some(Ok(AgentEvent::Finish(_)))));
    }

    #[tokio::test]
    async fn test_parse_error_is_fed_back() {
        let llm = Scripted::new(&["I am confused", "Final Answer: ok"]);
        let agent = agent(llm.clone(), 5);
        let events = collect(&agent, "hi").await;

        assert!(matches!(&events[0], Ok(AgentEvent::ParseError { .. })));
        assert!(matches!(&events[1], Ok(AgentEvent::Finish(_))));
        let prompts = llm.prompts.lock().unwrap();
        assert!(prompts[1].contains(
            "I am confused\nObservation: Invalid Format: Missing 'Action:' after 'Thought:'"
        ));
    }

    #[tokio::test]
    async fn test_iteration_cap() {
        let llm = Scripted::new(&["nonsense", "nonsense", "nonsense"]);
        let agent = agent(llm, 2);
        let events = collect(&agent, "hi").await;

        assert_eq!(events.len(), 3);
        assert!(matches!(events.last(), Some(Err(AppError::IterationLimit(2)))));
    }

    #[tokio::test]
    async fn test_model_error_ends_stream() {
        let llm = Scripted::new(&[]);
        let agent = agent(llm, 5);
        let events = collect(&agent, "hi").await;

        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], Err(AppError::LLM(_))));
    }

    #[tokio::test]
    async fn test_run_returns_final_answer() {
        let llm = Scripted::new(&["Final Answer: Paris"]);
        let agent = agent(llm, 5);
        let finish = agent.run("capital of France?").await.unwrap();
        assert_eq!(finish.output, "Paris");
    }
}
