//! Health check endpoint for container orchestration.
//!
//! A liveness probe: answers `ALIVE` to any method so load balancers and
//! uptime checkers can use whatever verb they prefer. `OPTIONS` gets an
//! empty 204 for CORS preflight.

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};

/// Health check handler.
pub async fn health(method: Method) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::NO_CONTENT.into_response();
    }
    (StatusCode::OK, "ALIVE").into_response()
}
