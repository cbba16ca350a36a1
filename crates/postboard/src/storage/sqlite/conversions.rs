//! SQLite row conversion types.
//!
//! Each `*Row` mirrors the column list of the matching `SELECT`/`RETURNING`
//! clause in [`super::schema`] and converts into the domain type without I/O.

use postboard_core::model::{Comment, Post, User};
use postboard_core::storage::{RepositoryError, Result};

/// Columns: id, username, password_hash
#[derive(Debug, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
        }
    }
}

/// Columns: id, title, content, user_id, commentable
#[derive(Debug, sqlx::FromRow)]
pub struct PostRow {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub user_id: i64,
    pub commentable: bool,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            user_id: row.user_id,
            commentable: row.commentable,
        }
    }
}

/// Columns: id, content, user_id, post_id, parent_id
#[derive(Debug, sqlx::FromRow)]
pub struct CommentRow {
    pub id: i64,
    pub content: String,
    pub user_id: i64,
    pub post_id: i64,
    pub parent_id: Option<i64>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            content: row.content,
            user_id: row.user_id,
            post_id: row.post_id,
            parent_id: row.parent_id,
        }
    }
}

/// Converts a batch of rows into domain types.
pub fn rows_into<R, T: From<R>>(rows: Vec<R>) -> Vec<T> {
    rows.into_iter().map(T::from).collect()
}

/// Encodes IDs as the JSON array bound to the `json_each` batch predicates.
pub fn ids_to_json(ids: &[i64]) -> Result<String> {
    serde_json::to_string(ids)
        .map_err(|e| RepositoryError::Internal(format!("Failed to encode ID list: {e}")))
}
