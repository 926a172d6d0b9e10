use crate::{
    agents::report,
    types::{AppError, QueryRequest, Result},
    AppState,
};
use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::info;

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "AI Agent Router API is running!" }))
}

/// Route a query through the agent.
///
/// The body is a stream that yields exactly one newline-terminated JSON
/// object once the run completes. Agent failures are reported inside that
/// object; only a malformed request produces an error status.
pub async fn query(
    State(state): State<AppState>,
    payload: std::result::Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(request) = payload.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    info!(query = %request.query, "Received query");

    let agent = state.agent.clone();
    let body = async_stream::stream! {
        let response = report(&request.query, agent.stream(&request.query)).await;
        info!(tool_used = %response.tool_used, "Query answered");
        yield serde_json::to_string(&response)
            .map(|line| line + "\n")
            .map_err(std::io::Error::other);
    };

    Ok((
        [(header::CONTENT_TYPE, "application/json")],
        Body::from_stream(body),
    )
        .into_response())
}
