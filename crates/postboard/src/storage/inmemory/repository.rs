//! In-memory repository implementation.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use postboard_core::model::{Comment, Post, User};
use postboard_core::storage::{
    CommentRepository, Pagination, PostRepository, RepositoryError, Result, UserRepository,
};

use super::table::Table;
use crate::storage::hash_password;

/// In-memory storage backend.
///
/// Each entity type has its own lock; no operation holds more than one, so
/// operations on different entity types never block each other (and are not
/// atomic with respect to each other). Readers share a lock, writers hold it
/// exclusively. Every read hands back an owned copy.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    users: Arc<RwLock<Table<User>>>,
    posts: Arc<RwLock<Table<Post>>>,
    comments: Arc<RwLock<Table<Comment>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn create_user(&self, username: &str, password: &str) -> Result<User> {
        // Hash outside the lock so a slow hash never blocks readers.
        let password_hash = hash_password(password).await?;

        let mut users = self.users.write().await;
        if users.values().any(|user| user.username == username) {
            return Err(RepositoryError::DuplicateUsername(username.to_string()));
        }

        let user = users
            .insert_with(|id| User {
                id,
                username: username.to_string(),
                password_hash,
            })
            .clone();

        tracing::debug!(user_id = user.id, "Stored user in memory");
        Ok(user)
    }

    async fn get_user_by_id(&self, id: i64) -> Result<User> {
        let users = self.users.read().await;
        users
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("User", id))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<User> {
        let users = self.users.read().await;
        let found = users
            .values()
            .find(|user| user.username == username)
            .cloned();
        found.ok_or_else(|| RepositoryError::not_found("User", username))
    }

    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>> {
        let wanted: BTreeSet<i64> = ids.iter().copied().collect();

        let users = self.users.read().await;
        Ok(wanted
            .into_iter()
            .filter_map(|id| users.get(id).cloned())
            .collect())
    }
}

#[async_trait]
impl PostRepository for InMemoryRepository {
    async fn create_post(
        &self,
        title: &str,
        content: &str,
        user_id: i64,
        commentable: bool,
    ) -> Result<Post> {
        let mut posts = self.posts.write().await;
        let post = posts
            .insert_with(|id| Post {
                id,
                title: title.to_string(),
                content: content.to_string(),
                user_id,
                commentable,
            })
            .clone();

        tracing::debug!(post_id = post.id, user_id, "Stored post in memory");
        Ok(post)
    }

    async fn get_post_by_id(&self, id: i64) -> Result<Post> {
        let posts = self.posts.read().await;
        posts
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("Post", id))
    }

    async fn get_posts(&self, page: Pagination) -> Result<Vec<Post>> {
        if page.is_empty() {
            return Ok(Vec::new());
        }
        let posts = self.posts.read().await;
        Ok(page.apply(posts.values()).into_iter().cloned().collect())
    }

    async fn get_posts_by_user(&self, user_id: i64, page: Pagination) -> Result<Vec<Post>> {
        if page.is_empty() {
            return Ok(Vec::new());
        }
        let posts = self.posts.read().await;
        let owned = posts.values().filter(|post| post.user_id == user_id);
        Ok(page.apply(owned).into_iter().cloned().collect())
    }

    async fn update_post(
        &self,
        id: i64,
        title: &str,
        content: &str,
        user_id: i64,
        commentable: bool,
    ) -> Result<Post> {
        let mut posts = self.posts.write().await;
        let post = posts
            .get_mut(id)
            .filter(|post| post.user_id == user_id)
            .ok_or_else(|| RepositoryError::not_found("Post", id))?;

        post.title = title.to_string();
        post.content = content.to_string();
        post.commentable = commentable;

        Ok(post.clone())
    }

    async fn delete_post(&self, id: i64) -> Result<()> {
        let mut posts = self.posts.write().await;
        if posts.remove(id).is_none() {
            return Err(RepositoryError::not_found("Post", id));
        }

        tracing::debug!(post_id = id, "Deleted post from memory");
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryRepository {
    async fn create_comment(
        &self,
        content: &str,
        user_id: i64,
        post_id: i64,
        parent_id: Option<i64>,
    ) -> Result<Comment> {
        let mut comments = self.comments.write().await;

        if let Some(parent_id) = parent_id {
            let parent_on_post = comments
                .get(parent_id)
                .is_some_and(|parent| parent.post_id == post_id);
            if !parent_on_post {
                return Err(RepositoryError::ConstraintViolation(format!(
                    "parent comment {parent_id} does not exist on post {post_id}"
                )));
            }
        }

        let comment = comments
            .insert_with(|id| Comment {
                id,
                content: content.to_string(),
                user_id,
                post_id,
                parent_id,
            })
            .clone();

        tracing::debug!(comment_id = comment.id, post_id, "Stored comment in memory");
        Ok(comment)
    }

    async fn get_comment_by_id(&self, id: i64) -> Result<Comment> {
        let comments = self.comments.read().await;
        comments
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("Comment", id))
    }

    async fn get_comments_by_post(&self, post_id: i64, page: Pagination) -> Result<Vec<Comment>> {
        if page.is_empty() {
            return Ok(Vec::new());
        }
        let comments = self.comments.read().await;
        let on_post = comments.values().filter(|c| c.post_id == post_id);
        Ok(page.apply(on_post).into_iter().cloned().collect())
    }

    async fn get_comments_by_posts(&self, post_ids: &[i64]) -> Result<Vec<Comment>> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }
        let wanted: HashSet<i64> = post_ids.iter().copied().collect();

        let comments = self.comments.read().await;
        Ok(comments
            .values()
            .filter(|c| wanted.contains(&c.post_id))
            .cloned()
            .collect())
    }

    async fn get_replies(&self, parent_id: i64) -> Result<Vec<Comment>> {
        let comments = self.comments.read().await;
        Ok(comments
            .values()
            .filter(|c| c.parent_id == Some(parent_id))
            .cloned()
            .collect())
    }

    async fn update_comment(&self, id: i64, content: &str) -> Result<Comment> {
        let mut comments = self.comments.write().await;
        let comment = comments
            .get_mut(id)
            .ok_or_else(|| RepositoryError::not_found("Comment", id))?;

        comment.content = content.to_string();

        Ok(comment.clone())
    }

    async fn delete_comment(&self, id: i64) -> Result<()> {
        let mut comments = self.comments.write().await;
        if comments.remove(id).is_none() {
            return Err(RepositoryError::not_found("Comment", id));
        }

        tracing::debug!(comment_id = id, "Deleted comment from memory");
        Ok(())
    }
}
