//! The front-page feed.
//!
//! A page of posts needs every post's author and comments. Both are
//! batch-fetched, so the feed costs three repository calls regardless of the
//! page size.

use std::collections::{BTreeSet, HashMap};

use axum::{
    extract::{Query, State},
    Json,
};

use postboard_core::storage::Pagination;
use postboard_core::thread::build_forests;

use crate::{handlers::AppError, models::FeedItem, state::AppState};

/// A page of posts with authors and threaded comments (GET /api/feed).
pub async fn get_feed(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<FeedItem>>, AppError> {
    let posts = state.posts.get_posts(page).await?;
    if posts.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let post_ids: Vec<i64> = posts.iter().map(|post| post.id).collect();
    let author_ids: Vec<i64> = posts
        .iter()
        .map(|post| post.user_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let (authors, comments) = tokio::try_join!(
        state.users.get_users_by_ids(&author_ids),
        state.comments.get_comments_by_posts(&post_ids),
    )?;

    let authors: HashMap<i64, _> = authors.into_iter().map(|u| (u.id, u)).collect();
    let mut forests = build_forests(comments);

    let items = posts
        .into_iter()
        .map(|post| FeedItem {
            // Several posts may share an author.
            author: authors.get(&post.user_id).cloned(),
            comments: forests.remove(&post.id).unwrap_or_default(),
            post,
        })
        .collect();

    Ok(Json(items))
}
