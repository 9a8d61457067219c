//! The user lookup capability injected into the HTTP layer.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::time::Instant;

use super::User;

/// Request-scoped context handed to every lookup.
///
/// Carries the deadline the lookup must meet. Caller-side cancellation is
/// delivered by dropping the lookup future, so implementations only need to
/// be cancel-safe across `.await` points.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext {
    deadline: Instant,
}

impl RequestContext {
    /// Create a context whose deadline is `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Instant::now() + timeout,
        }
    }

    /// Absolute deadline for the request.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Time left before the deadline, zero once it has passed.
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    /// Whether the deadline has already passed.
    pub fn is_expired(&self) -> bool {
        self.remaining().is_zero()
    }
}

/// Failures a lookup may report.
///
/// The HTTP layer does not distinguish between them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// No user exists for the identifier.
    #[error("user {0} not found")]
    NotFound(String),

    /// The request deadline passed before the lookup finished.
    #[error("lookup deadline exceeded")]
    DeadlineExceeded,

    /// The backing store could not be reached.
    #[error("user store unavailable: {0}")]
    Unavailable(String),
}

/// Retrieves a user by opaque identifier.
#[async_trait]
pub trait UserLookup: Send + Sync {
    /// Fetch the user identified by `user_id`.
    async fn get_user(&self, ctx: &RequestContext, user_id: &str) -> Result<User, LookupError>;
}

/// Lookup used when no user store has been wired in.
///
/// Every call fails, which the HTTP layer renders as its standard error envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredUserLookup;

#[async_trait]
impl UserLookup for UnconfiguredUserLookup {
    async fn get_user(&self, _ctx: &RequestContext, _user_id: &str) -> Result<User, LookupError> {
        Err(LookupError::Unavailable(
            "no user store configured".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn context_remaining_counts_down_to_zero() {
        let ctx = RequestContext::with_timeout(Duration::from_secs(2));
        assert_eq!(ctx.remaining(), Duration::from_secs(2));
        assert!(!ctx.is_expired());

        tokio::time::advance(Duration::from_secs(3)).await;

        assert_eq!(ctx.remaining(), Duration::ZERO);
        assert!(ctx.is_expired());
    }

    #[tokio::test]
    async fn unconfigured_lookup_always_fails() {
        let ctx = RequestContext::with_timeout(Duration::from_secs(1));
        let result = UnconfiguredUserLookup.get_user(&ctx, "101").await;

        assert!(matches!(result, Err(LookupError::Unavailable(_))));
    }
}
