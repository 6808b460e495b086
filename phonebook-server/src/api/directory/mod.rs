//! Directory API Module
//!
//! Public, read-only endpoints

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Directory router
/// - /api/employees: full record set + revision
/// - /api/directory: composed view-model for the public directory
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/employees", get(handler::list))
        .route("/api/directory", get(handler::directory))
}
