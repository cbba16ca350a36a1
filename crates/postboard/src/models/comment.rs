use serde::Deserialize;

/// Request payload for creating a comment on a post.
#[derive(Debug, Deserialize)]
pub struct CreateComment {
    pub content: String,
    pub user_id: i64,
    /// Comment being replied to; absent for a top-level comment.
    #[serde(default)]
    pub parent_id: Option<i64>,
}

/// Request payload for updating a comment.
#[derive(Debug, Deserialize)]
pub struct UpdateComment {
    pub content: String,
}
