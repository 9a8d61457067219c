//! Domain types for the user service.
//!
//! This module handles:
//! - The `User` entity returned by lookups
//! - The `UserLookup` capability and its request context
//! - Stand-in lookups for tests and for an unwired binary

pub mod lookup;
pub mod mock;
pub mod user;

pub use lookup::{LookupError, RequestContext, UnconfiguredUserLookup, UserLookup};
pub use mock::{MockLookupConfig, MockUserLookup};
pub use user::User;
