use serde::{Deserialize, Serialize};

/// A comment on a post, optionally replying to another comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub user_id: i64,
    pub post_id: i64,
    /// `None` for a top-level comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
}

impl Comment {
    /// Returns true if this comment replies to another comment.
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }
}
