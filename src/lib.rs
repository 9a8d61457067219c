//! Minimal user lookup HTTP service.
//!
//! Serves one read endpoint that fetches a user through an injected
//! [`domain::UserLookup`], plus liveness and readiness probes:
//!
//! ```text
//! GET /liveness               -> 200, empty body
//! GET /readness               -> 200, empty body
//! GET /api/v1/users/:user_id  -> 200 User JSON | 400 {"error_code":400,"message":"user not found"}
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`domain`]: User entity and lookup capability
//! - [`api`]: HTTP handlers and router
//! - [`server`]: Listener lifecycle and bounded graceful shutdown
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod server;
pub mod utils;

pub use config::Config;
pub use error::{Result, ServerError, ServiceError};
