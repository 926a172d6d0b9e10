//! End-to-end runs of the reasoning loop and reporter with scripted models.

mod common;

use agent_router::agents::{report, AgentEvent};
use agent_router::{AppState, ToolOutput, ToolUsed};
use common::mocks::{FixedLLMClient, ScriptedLLMClient};
use common::{state_with, test_config};
use futures::StreamExt;
use rstest::rstest;
use std::sync::Arc;

async fn ask(state: &AppState, query: &str) -> agent_router::QueryResponse {
    report(query, state.agent.stream(query)).await
}

#[rstest]
#[case("10 + 5", ToolOutput::Integer(15))]
#[case("10 / 4", ToolOutput::Float(2.5))]
#[case("20 / 4", ToolOutput::Integer(5))]
#[case("7 / 0", ToolOutput::Text("Division by zero is not allowed.".to_string()))]
#[tokio::test]
async fn test_math_observation_reaches_scratchpad(
    #[case] expression: &str,
    #[case] expected: ToolOutput,
) {
    let action = format!("Action: MathTool\nAction Input: {}", expression);
    let llm = Arc::new(ScriptedLLMClient::new(&[&action, "Final Answer: done"]));
    let state = state_with(llm.clone());

    let events: Vec<_> = state.agent.stream(expression).collect().await;
    match &events[1] {
        Ok(AgentEvent::Observation { observation, .. }) => assert_eq!(observation, &expected),
        other => panic!("unexpected event {:?}", other),
    }

    let prompts = llm.prompts();
    assert!(prompts[1].contains(&format!("Observation: {}\nThought: ", expected)));
}

#[tokio::test]
async fn test_math_query_reports_number() {
    let llm = Arc::new(ScriptedLLMClient::new(&[
        " I need to multiply.\nAction: MathTool\nAction Input: 42 * 7",
        " I now know the final answer\nFinal Answer: 294",
    ]));
    let state = state_with(llm);

    let response = ask(&state, "What is 42 * 7?").await;
    assert_eq!(response.tool_used, ToolUsed::Math);
    assert_eq!(response.result, ToolOutput::Integer(294));
}

#[tokio::test]
async fn test_llm_tool_answer() {
    let llm = Arc::new(ScriptedLLMClient::new(&[
        "Action: LLMTool\nAction Input: Tell me a joke",
        "Why did the crab cross the road?",
        "Final Answer: Why did the crab cross the road?",
    ]));
    let mut config = test_config();
    config.keys.llm_tool = Some("test-key".to_string());
    let state = AppState::with_clients(config, llm.clone(), llm.clone()).unwrap();

    let response = ask(&state, "Tell me a joke").await;
    assert_eq!(response.tool_used, ToolUsed::Llm);
    assert_eq!(
        response.result,
        ToolOutput::Text("Why did the crab cross the road?".to_string())
    );
    // The tool received the raw input, not the agent prompt.
    assert_eq!(llm.prompts()[1], "Tell me a joke");
}

#[tokio::test]
async fn test_unknown_first_tool_reports_llm() {
    let llm = Arc::new(ScriptedLLMClient::new(&[
        "Action: SearchTool\nAction Input: rust",
        "Action: MathTool\nAction Input: 1 + 1",
        "Final Answer: 2",
    ]));
    let state = state_with(llm.clone());

    let response = ask(&state, "search").await;
    assert_eq!(response.tool_used, ToolUsed::Llm);
    assert_eq!(response.result, ToolOutput::Integer(2));
    assert!(llm.prompts()[1].contains(
        "Observation: SearchTool is not a valid tool, try one of [WeatherTool, MathTool, LLMTool]."
    ));
}

#[tokio::test]
async fn test_parse_error_recovery() {
    let llm = Arc::new(ScriptedLLMClient::new(&[
        "I think I should use math",
        "Action: MathTool\nAction Input: 3 * 3",
        "Final Answer: 9",
    ]));
    let state = state_with(llm.clone());

    let response = ask(&state, "3 * 3").await;
    assert_eq!(response.tool_used, ToolUsed::Math);
    assert_eq!(response.result, ToolOutput::Integer(9));
    assert!(llm.prompts()[1]
        .contains("Observation: Invalid Format: Missing 'Action:' after 'Thought:'"));
}

#[tokio::test]
async fn test_iteration_cap_reports_error() {
    let llm = Arc::new(FixedLLMClient("Action: MathTool\nAction Input: 1 + 1"));
    let mut config = test_config();
    config.agent.max_iterations = 3;
    let state = AppState::with_clients(config, llm.clone(), llm).unwrap();

    let response = ask(&state, "loop forever").await;
    assert_eq!(response.tool_used, ToolUsed::Llm);
    assert_eq!(
        response.result.to_string(),
        "An error occurred during agent execution: Agent could not determine an answer within 3 iterations"
    );
}

#[tokio::test]
async fn test_identical_queries_give_identical_responses() {
    let turns = [
        "Action: MathTool\nAction Input: 6 / 4",
        "Final Answer: 1.5",
    ];
    let first = ask(&state_with(Arc::new(ScriptedLLMClient::new(&turns))), "6 / 4").await;
    let second = ask(&state_with(Arc::new(ScriptedLLMClient::new(&turns))), "6 / 4").await;

    assert_eq!(first, second);
    assert_eq!(first.result, ToolOutput::Float(1.5));
}
