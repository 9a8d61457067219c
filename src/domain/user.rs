//! User entity exchanged across the service boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A user as produced by a [`UserLookup`](super::UserLookup).
///
/// The identifier used to fetch a user is a request parameter only and is
/// not part of the entity.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct User {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Plaintext password, serialized as-is in API responses.
    pub password: String,
    /// Birth date, format not validated (e.g. "10/02/1990").
    pub birth_day: String,
}

// Hand-written so the password never reaches the process log.
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("birth_day", &self.birth_day)
            .finish()
    }
}
