//! Mock user lookup for unit and integration testing.
//!
//! This module provides a lookup that can be scripted to succeed or fail
//! without any backing store.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::{LookupError, RequestContext, User, UserLookup};

/// Configuration for mock lookup behavior.
#[derive(Debug, Clone, Default)]
pub struct MockLookupConfig {
    /// User to return on success.
    pub user: User,
    /// Error to return instead of the user.
    pub failure: Option<LookupError>,
    /// Simulated latency in milliseconds.
    pub latency_ms: u64,
}

/// Scriptable [`UserLookup`] that records the identifiers it is asked for.
#[derive(Debug, Clone, Default)]
pub struct MockUserLookup {
    config: MockLookupConfig,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockUserLookup {
    /// Create a mock with custom configuration.
    pub fn with_config(config: MockLookupConfig) -> Self {
        Self {
            config,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Mock that returns `user` for every identifier.
    pub fn returning(user: User) -> Self {
        Self::with_config(MockLookupConfig {
            user,
            ..MockLookupConfig::default()
        })
    }

    /// Mock that fails every lookup with `error`.
    pub fn failing(error: LookupError) -> Self {
        Self::with_config(MockLookupConfig {
            failure: Some(error),
            ..MockLookupConfig::default()
        })
    }

    /// Add simulated latency to every lookup.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.config.latency_ms = latency.as_millis().try_into().unwrap_or(u64::MAX);
        self
    }

    /// Identifiers received so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        match self.calls.lock() {
            Ok(calls) => calls.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn record(&self, user_id: &str) {
        match self.calls.lock() {
            Ok(mut calls) => calls.push(user_id.to_string()),
            Err(poisoned) => poisoned.into_inner().push(user_id.to_string()),
        }
    }
}

#[async_trait]
impl UserLookup for MockUserLookup {
    async fn get_user(&self, _ctx: &RequestContext, user_id: &str) -> Result<User, LookupError> {
        self.record(user_id);

        if self.config.latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.latency_ms)).await;
        }

        match &self.config.failure {
            Some(error) => Err(error.clone()),
            None => Ok(self.config.user.clone()),
        }
    }
}
