use serde::Serialize;

use postboard_core::model::{Post, User};
use postboard_core::thread::CommentNode;

/// A post with its comments assembled into a reply forest.
#[derive(Debug, Serialize)]
pub struct PostThread {
    pub post: Post,
    pub comments: Vec<CommentNode>,
}

/// One feed entry: a post, its author and its reply forest.
#[derive(Debug, Serialize)]
pub struct FeedItem {
    #[serde(flatten)]
    pub post: Post,
    /// `None` if the author no longer exists.
    pub author: Option<User>,
    pub comments: Vec<CommentNode>,
}
