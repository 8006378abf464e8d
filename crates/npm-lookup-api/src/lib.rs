//! npm Lookup REST API
//!
//! This crate provides the Axum-based HTTP surface: the lookup form
//! endpoint, health checks and the Prometheus metrics endpoint.

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::{AppState, MetricsHandle};
