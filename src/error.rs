//! Unified error types for the user service.

use std::time::Duration;

use thiserror::Error;

/// Unified error type for process startup and lifecycle.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Environment variables could not be mapped onto the config.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// The `.env` file exists but could not be loaded.
    #[error("env file error: {0}")]
    EnvFile(#[source] dotenvy::Error),

    /// Configuration parsed but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Logger initialization failed.
    #[error("logger initialization failed: {0}")]
    Logging(String),

    /// HTTP server lifecycle error.
    #[error("server error: {0}")]
    Server(#[from] ServerError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP server lifecycle errors.
#[derive(Error, Debug)]
pub enum ServerError {
    /// The listener could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address that failed to bind.
        addr: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The server stopped serving on its own.
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),

    /// In-flight requests did not drain before the shutdown timeout.
    #[error("could not stop server gracefully within {0:?}")]
    ShutdownTimeout(Duration),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;
