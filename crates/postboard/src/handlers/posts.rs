//! Post CRUD handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use postboard_core::model::Post;
use postboard_core::storage::Pagination;

use crate::{
    handlers::AppError,
    models::{CreatePost, UpdatePost},
    state::AppState,
};

/// List a page of posts (GET /api/posts).
pub async fn list_posts(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<Post>>, AppError> {
    let posts = state.posts.get_posts(page).await?;
    Ok(Json(posts))
}

/// Create a new post (POST /api/posts).
pub async fn create_post(
    State(state): State<AppState>,
    Json(payload): Json<CreatePost>,
) -> Result<(StatusCode, Json<Post>), AppError> {
    let post = state
        .posts
        .create_post(
            &payload.title,
            &payload.content,
            payload.user_id,
            payload.commentable,
        )
        .await?;

    tracing::info!(post_id = post.id, user_id = post.user_id, "Created new post");

    Ok((StatusCode::CREATED, Json(post)))
}

/// Get a single post by ID (GET /api/posts/{id}).
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Post>, AppError> {
    let post = state.posts.get_post_by_id(id).await?;
    Ok(Json(post))
}

/// Update a post by ID (PUT /api/posts/{id}).
///
/// Responds 404 when `user_id` does not own the post.
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePost>,
) -> Result<Json<Post>, AppError> {
    let post = state
        .posts
        .update_post(
            id,
            &payload.title,
            &payload.content,
            payload.user_id,
            payload.commentable,
        )
        .await?;

    tracing::info!(post_id = id, "Updated post");

    Ok(Json(post))
}

/// Delete a post by ID (DELETE /api/posts/{id}).
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.posts.delete_post(id).await?;

    tracing::info!(post_id = id, "Deleted post");

    Ok(StatusCode::NO_CONTENT)
}
