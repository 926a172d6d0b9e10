//! API request handlers.

/// Liveness and query routing handlers.
pub mod query;
/// Tool listing handler.
pub mod tools;
