use std::fmt;

use serde::{Deserialize, Serialize};

use crate::auth::verify_password;

/// A registered account.
///
/// The password hash is populated inside the repository boundary only. It is
/// skipped when serializing and redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
}

impl User {
    /// Checks a candidate password against the stored hash.
    pub fn check_password(&self, candidate: &str) -> bool {
        verify_password(candidate, &self.password_hash)
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}
