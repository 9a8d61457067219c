//! HTTP API module for health probes and user retrieval.

pub mod handlers;
pub mod routes;

pub use handlers::{AppState, ErrorResponse};
pub use routes::create_router;
