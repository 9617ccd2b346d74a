//! HTTP server module.
//!
//! Serves the router on the configured address with graceful shutdown on
//! SIGTERM/SIGINT. TLS is expected to be terminated in front of the service.

mod server;
mod shutdown;

pub use server::{start_server, ServerError};
