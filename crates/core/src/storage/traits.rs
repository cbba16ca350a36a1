use async_trait::async_trait;

use crate::model::{Comment, Post, User};

use super::{Pagination, Result};

/// Repository for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates a user, hashing the password before it is stored.
    ///
    /// Fails with `DuplicateUsername` if the (case-sensitive) name is taken.
    async fn create_user(&self, username: &str, password: &str) -> Result<User>;

    /// Gets a user by ID.
    async fn get_user_by_id(&self, id: i64) -> Result<User>;

    /// Gets a user by exact username.
    async fn get_user_by_username(&self, username: &str) -> Result<User>;

    /// Gets every user whose ID is in `ids`, in one round trip.
    ///
    /// Missing IDs are silently omitted. Results are ordered by ID.
    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>>;
}

/// Repository for posts.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Creates a post. The author ID is not checked for existence here.
    async fn create_post(
        &self,
        title: &str,
        content: &str,
        user_id: i64,
        commentable: bool,
    ) -> Result<Post>;

    /// Gets a post by ID.
    async fn get_post_by_id(&self, id: i64) -> Result<Post>;

    /// Gets a page of all posts, ordered by ID.
    async fn get_posts(&self, page: Pagination) -> Result<Vec<Post>>;

    /// Gets a page of the posts written by `user_id`, ordered by ID.
    async fn get_posts_by_user(&self, user_id: i64, page: Pagination) -> Result<Vec<Post>>;

    /// Updates title, content and commentable flag of a post owned by `user_id`.
    ///
    /// A post owned by someone else is reported as `NotFound` and left untouched.
    async fn update_post(
        &self,
        id: i64,
        title: &str,
        content: &str,
        user_id: i64,
        commentable: bool,
    ) -> Result<Post>;

    /// Deletes a post by ID.
    async fn delete_post(&self, id: i64) -> Result<()>;
}

/// Repository for threaded comments.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Creates a comment. `parent_id` must name an existing comment on the
    /// same post, otherwise this fails with `ConstraintViolation`.
    async fn create_comment(
        &self,
        content: &str,
        user_id: i64,
        post_id: i64,
        parent_id: Option<i64>,
    ) -> Result<Comment>;

    /// Gets a comment by ID.
    async fn get_comment_by_id(&self, id: i64) -> Result<Comment>;

    /// Gets a page of the comments on a post (top-level and replies), ordered by ID.
    async fn get_comments_by_post(&self, post_id: i64, page: Pagination) -> Result<Vec<Comment>>;

    /// Gets all comments on any of `post_ids`, in one round trip, ordered by ID.
    async fn get_comments_by_posts(&self, post_ids: &[i64]) -> Result<Vec<Comment>>;

    /// Gets the direct replies to a comment, ordered by ID.
    async fn get_replies(&self, parent_id: i64) -> Result<Vec<Comment>>;

    /// Replaces the content of a comment.
    async fn update_comment(&self, id: i64, content: &str) -> Result<Comment>;

    /// Deletes a comment by ID.
    async fn delete_comment(&self, id: i64) -> Result<()>;
}
