//! Registration and password login.
//!
//! Login only verifies credentials and returns the user; issuing session
//! tokens is left to whatever sits in front of this service.

use axum::{extract::State, http::StatusCode, Json};

use postboard_core::auth::verify_without_user;
use postboard_core::model::User;
use postboard_core::storage::RepositoryError;

use crate::{
    handlers::{AppError, RequestError},
    models::Credentials,
    state::AppState,
};

/// Register a new user (POST /auth/register).
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<Credentials>,
) -> Result<(StatusCode, Json<User>), AppError> {
    payload.validate()?;

    let user = state
        .users
        .create_user(&payload.username, &payload.password)
        .await?;

    tracing::info!(user_id = user.id, "Registered new user");

    Ok((StatusCode::CREATED, Json(user)))
}

/// Check a username and password (POST /auth/login).
///
/// An unknown username and a wrong password both yield 401, and both pay
/// for one Argon2 verification before answering.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<Credentials>,
) -> Result<Json<User>, AppError> {
    payload.validate()?;

    let user = match state.users.get_user_by_username(&payload.username).await {
        Ok(user) => user,
        Err(RepositoryError::NotFound { .. }) => {
            let password = payload.password;
            tokio::task::spawn_blocking(move || verify_without_user(&password)).await?;
            return Err(RequestError::Unauthorized.into());
        }
        Err(e) => return Err(e.into()),
    };

    // Argon2 verification is as slow as hashing; keep it off the async workers.
    let password = payload.password;
    let (user, valid) = tokio::task::spawn_blocking(move || {
        let valid = user.check_password(&password);
        (user, valid)
    })
    .await?;

    if !valid {
        tracing::warn!(user_id = user.id, "Rejected login");
        return Err(RequestError::Unauthorized.into());
    }

    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(user))
}
