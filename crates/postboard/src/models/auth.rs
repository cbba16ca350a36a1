use serde::Deserialize;

use crate::handlers::RequestError;

/// Request payload for registering or logging in.
#[derive(Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Rejects blank usernames and empty passwords.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.username.trim().is_empty() {
            return Err(RequestError::BadRequest(
                "username must not be empty".to_string(),
            ));
        }
        if self.password.is_empty() {
            return Err(RequestError::BadRequest(
                "password must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
