//! Pure functions for mapping repository errors to HTTP status codes.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `DuplicateUsername` -> 409 (Conflict)
/// - `ConstraintViolation` -> 400 (Bad Request)
/// - `TransientIo` -> 503 (Service Unavailable)
/// - `Internal` -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use postboard_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::not_found("Post", 7);
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::DuplicateUsername(_) => 409,
        RepositoryError::ConstraintViolation(_) => 400,
        RepositoryError::TransientIo(_) => 503,
        RepositoryError::Internal(_) => 500,
    }
}
