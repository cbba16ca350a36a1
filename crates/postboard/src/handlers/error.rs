use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use postboard_core::storage::{repository_error_to_status_code, RepositoryError};

/// Request-level failures that do not come from a repository.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Invalid username or password")]
    Unauthorized,
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    BadRequest(String),
}

impl RequestError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// Application error type that wraps `anyhow::Error`.
///
/// This allows using `?` on repository calls; the status code is recovered
/// by downcasting to the known error types.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    fn status_code(&self) -> StatusCode {
        if let Some(repo_error) = self.0.downcast_ref::<RepositoryError>() {
            let code = repository_error_to_status_code(repo_error);
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        } else if let Some(request_error) = self.0.downcast_ref::<RequestError>() {
            request_error.status_code()
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            tracing::error!(error = %self.0, status = %status_code, "Request failed");
        } else {
            tracing::warn!(error = %self.0, status = %status_code, "Request rejected");
        }

        (status_code, self.0.to_string()).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_errors_keep_their_status() {
        let cases = [
            (RepositoryError::not_found("Post", 1), StatusCode::NOT_FOUND),
            (
                RepositoryError::DuplicateUsername("alice".to_string()),
                StatusCode::CONFLICT,
            ),
            (
                RepositoryError::ConstraintViolation("bad parent".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                RepositoryError::TransientIo("pool timed out".to_string()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(AppError::from(error).into_response().status(), expected);
        }
    }

    #[test]
    fn test_request_errors_keep_their_status() {
        assert_eq!(
            AppError::from(RequestError::Unauthorized)
                .into_response()
                .status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::from(RequestError::Forbidden("closed".to_string()))
                .into_response()
                .status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_unknown_errors_are_internal() {
        let error = AppError(anyhow::anyhow!("boom"));
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
