//! HTTP route handlers.
//!
//! Both endpoints accept any method and decide for themselves how to answer,
//! so CORS preflight (`OPTIONS`) is handled before any method or body checks.
//! CORS headers are attached per route group: the health check only opens
//! the origin, the generate endpoint also advertises methods and headers.
//!
//! Request tracing is enabled via middleware that generates a unique request
//! ID for each incoming request, allowing correlation of all logs within a
//! request.

pub mod generate;
pub mod health;

use axum::{middleware, routing::any, Router};
use http::header::{
    HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN,
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::{CORS_ALLOW_HEADERS, CORS_ALLOW_METHODS, CORS_ALLOW_ORIGIN};
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router with all routes and CORS headers.
pub fn create_router(state: AppState) -> Router {
    // Health check - liveness probe, open origin only
    let health_routes = Router::new()
        .route("/health", any(health::health))
        .route("/api/health", any(health::health))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(CORS_ALLOW_ORIGIN),
        ));

    // Plan generation - full CORS for browser callers
    let generate_routes = Router::new()
        .route("/generate", any(generate::generate))
        .route("/api/generate", any(generate::generate))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(CORS_ALLOW_ORIGIN),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(CORS_ALLOW_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(CORS_ALLOW_HEADERS),
        ));

    Router::new()
        .merge(health_routes)
        .merge(generate_routes)
        .with_state(state)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
