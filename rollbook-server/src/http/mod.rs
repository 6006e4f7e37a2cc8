//! HTTP layer
//!
//! Axum server with:
//! - Permissive CORS on every response
//! - Request tracing
//! - Graceful shutdown that closes the store
//! - `{"detail": ...}` error bodies

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, run_server_with_shutdown, AppState, ServerConfig, ServerError};
