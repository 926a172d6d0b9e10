use crate::{types::ToolDefinition, AppState};
use axum::{extract::State, Json};

pub async fn list_tools(State(state): State<AppState>) -> Json<Vec<ToolDefinition>> {
    Json(state.agent.tools().get_tool_definitions())
}
