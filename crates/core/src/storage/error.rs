use thiserror::Error;

use crate::auth::PasswordError;

/// Errors that can occur during repository operations.
///
/// "Not found" is always an error, never an empty success: a lookup by
/// identifier that finds nothing returns `NotFound`, while a list query that
/// matches nothing returns `Ok(vec![])`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("Username already taken: {0}")]
    DuplicateUsername(String),
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("Transient I/O failure: {0}")]
    TransientIo(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RepositoryError {
    /// Shorthand for a `NotFound` keyed by anything displayable.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }
}

impl From<PasswordError> for RepositoryError {
    fn from(err: PasswordError) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
