//! HTTP API Handlers and Routes
//!
//! Built on axum. All routes are public.
//!
//! # API Endpoints
//!
//! - `GET /` - Liveness message
//! - `POST /query` - Route a query through the agent; the body streams a single
//!   JSON line `{"query", "tool_used", "result"}`
//! - `GET /tools` - List registered tools

/// Request handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;
