//! Reply-forest threading.
//!
//! Comments are fetched flat (one batch query per page of posts) and
//! threaded in memory here, so rendering a conversation never needs a
//! recursive or per-comment query.

mod forest;

pub use forest::{build_forests, build_reply_forest, group_by_post, CommentNode, MAX_THREAD_DEPTH};
