use axum::{
    extract::{Path, Query, State},
    Json,
};

use postboard_core::model::{Post, User};
use postboard_core::storage::Pagination;

use crate::{handlers::AppError, state::AppState};

/// Get a single user by ID (GET /api/users/{id}).
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<User>, AppError> {
    let user = state.users.get_user_by_id(id).await?;
    Ok(Json(user))
}

/// List a page of a user's posts (GET /api/users/{id}/posts).
pub async fn list_user_posts(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<Post>>, AppError> {
    let posts = state.posts.get_posts_by_user(id, page).await?;
    Ok(Json(posts))
}
