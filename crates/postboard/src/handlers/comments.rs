//! Comment handlers, including the threaded view of a post.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use postboard_core::model::Comment;
use postboard_core::storage::Pagination;
use postboard_core::thread::build_reply_forest;

use crate::{
    handlers::{AppError, RequestError},
    models::{CreateComment, PostThread, UpdateComment},
    state::AppState,
};

/// List a flat page of a post's comments (GET /api/posts/{id}/comments).
pub async fn list_post_comments(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<Comment>>, AppError> {
    let comments = state.comments.get_comments_by_post(post_id, page).await?;
    Ok(Json(comments))
}

/// Comment on a post or reply to a comment (POST /api/posts/{id}/comments).
///
/// Responds 403 when the post has commenting turned off.
pub async fn create_comment(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    Json(payload): Json<CreateComment>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    let post = state.posts.get_post_by_id(post_id).await?;
    if !post.commentable {
        return Err(
            RequestError::Forbidden(format!("post {post_id} is not open for comments")).into(),
        );
    }

    let comment = state
        .comments
        .create_comment(
            &payload.content,
            payload.user_id,
            post_id,
            payload.parent_id,
        )
        .await?;

    tracing::info!(
        comment_id = comment.id,
        post_id,
        parent_id = ?comment.parent_id,
        "Created new comment"
    );

    Ok((StatusCode::CREATED, Json(comment)))
}

/// A post with all of its comments threaded (GET /api/posts/{id}/thread).
pub async fn get_thread(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<Json<PostThread>, AppError> {
    let post = state.posts.get_post_by_id(post_id).await?;
    let comments = state.comments.get_comments_by_posts(&[post.id]).await?;

    Ok(Json(PostThread {
        post,
        comments: build_reply_forest(comments),
    }))
}

/// Get a single comment by ID (GET /api/comments/{id}).
pub async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Comment>, AppError> {
    let comment = state.comments.get_comment_by_id(id).await?;
    Ok(Json(comment))
}

/// List the direct replies to a comment (GET /api/comments/{id}/replies).
pub async fn list_replies(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Comment>>, AppError> {
    let replies = state.comments.get_replies(id).await?;
    Ok(Json(replies))
}

/// Update a comment by ID (PUT /api/comments/{id}).
pub async fn update_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateComment>,
) -> Result<Json<Comment>, AppError> {
    let comment = state.comments.update_comment(id, &payload.content).await?;

    tracing::info!(comment_id = id, "Updated comment");

    Ok(Json(comment))
}

/// Delete a comment by ID (DELETE /api/comments/{id}).
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.comments.delete_comment(id).await?;

    tracing::info!(comment_id = id, "Deleted comment");

    Ok(StatusCode::NO_CONTENT)
}
