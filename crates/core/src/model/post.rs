use serde::{Deserialize, Serialize};

/// A post authored by a user.
///
/// `user_id` is not checked for existence by the repositories themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub user_id: i64,
    /// Whether new comments may be attached. Enforced by the transport layer.
    pub commentable: bool,
}
