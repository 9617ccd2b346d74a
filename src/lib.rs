//! Lesson Planner: an HTTP service for generating classroom lesson plans.
//!
//! A generate endpoint validates lesson parameters and either builds a
//! deterministic sample plan (no API key configured) or asks a chat-completion
//! API for one, normalizing whatever comes back into a fixed schema. A health
//! endpoint serves liveness probes.

pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod plan;
pub mod routes;
pub mod state;
pub mod upstream;

pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;
