use crate::agents::parser::AgentAction;
use crate::tools::ToolRegistry;

/// One completed think/act/observe cycle.
#[derive(Debug, Clone)]
pub struct Step {
    pub action: AgentAction,
    pub observation: String,
}

/// Replay previous steps so the model continues where it left off.
pub fn render_scratchpad(steps: &[Step]) -> String {
    steps
        .iter()
        .map(|step| {
            format!(
                "{}\nObservation: {}\nThought: ",
                step.action.log, step.observation
            )
        })
        .collect()
}

/// Render the full prompt for the next model turn.
pub fn render(tools: &ToolRegistry, query: &str, steps: &[Step]) -> String {
    format!(
        r#"You are a helpful AI assistant that can route user queries to the appropriate tool.
You have access to the following tools:

{tools}

Use the following format:

Question: the input question you must answer
Thought: you should always think about what to do
Action: the action to take, should be one of [{tool_names}]
Action Input: the input to the action
Observation: the result of the action
... (this Thought/Action/Action Input/Observation can repeat N times)
Thought: I now know the final answer
Final Answer: the final answer to the original input question

Begin!

Question: {input}
Thought:{agent_scratchpad}"#,
        tools = tools.render_descriptions(),
        tool_names = tools.tool_names().join(", "),
        input = query,
        agent_scratchpad = render_scratchpad(steps),
    )
}
