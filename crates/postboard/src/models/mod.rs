mod auth;
mod comment;
mod feed;
mod post;

pub use auth::Credentials;
pub use comment::{CreateComment, UpdateComment};
pub use feed::{FeedItem, PostThread};
pub use post::{CreatePost, UpdatePost};
