//! HTTP API handlers.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{LookupError, RequestContext, UserLookup};

/// Message returned for every failed user lookup.
pub const USER_NOT_FOUND_MESSAGE: &str = "user not found";

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// User lookup capability.
    users: Arc<dyn UserLookup>,
    /// Deadline given to each lookup.
    request_timeout: Duration,
}

impl AppState {
    /// Create new app state around a lookup implementation.
    pub fn new(users: Arc<dyn UserLookup>, request_timeout: Duration) -> Self {
        Self {
            users,
            request_timeout,
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

/// Error envelope for failed requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Mirrors the HTTP status code.
    pub error_code: u16,
    /// Human-readable message.
    pub message: String,
}

impl ErrorResponse {
    /// The fixed response for any lookup failure.
    pub fn user_not_found() -> Self {
        Self {
            error_code: StatusCode::BAD_REQUEST.as_u16(),
            message: USER_NOT_FOUND_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.error_code).unwrap_or(StatusCode::BAD_REQUEST);
        (status, Json(self)).into_response()
    }
}

/// Liveness probe - always returns 200 with an empty body.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// Readiness probe - always returns 200 with an empty body.
pub async fn readiness() -> StatusCode {
    StatusCode::OK
}

/// Fetch a user by path identifier.
///
/// The identifier is the last path segment exactly as sent, without
/// percent-decoding. Any lookup failure, including running past the request
/// deadline, is reported as a 400 with the fixed
/// [`ErrorResponse::user_not_found`] body.
pub async fn get_user(State(state): State<AppState>, uri: Uri) -> Response {
    let user_id = raw_user_id(uri.path());
    let ctx = RequestContext::with_timeout(state.request_timeout);
    let lookup = state.users.get_user(&ctx, user_id);

    let result = tokio::time::timeout_at(ctx.deadline(), lookup)
        .await
        .unwrap_or(Err(LookupError::DeadlineExceeded));

    match result {
        Ok(user) => {
            info!(user_id = %user_id, user = ?user, "user retrieved");
            (StatusCode::OK, Json(user)).into_response()
        }
        Err(_) => ErrorResponse::user_not_found().into_response(),
    }
}

/// Last segment of a matched `/api/v1/users/:user_id` path.
fn raw_user_id(path: &str) -> &str {
    path.rsplit_once('/').map_or(path, |(_, id)| id)
}
