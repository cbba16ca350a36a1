//! SQLite repository implementation.
//!
//! Implements the repository traits from `postboard_core::storage` on an
//! `sqlx` connection pool. Every operation is a single statement; creates
//! and updates use `RETURNING` so the stored row comes back in the same
//! round trip.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use postboard_core::model::{Comment, Post, User};
use postboard_core::storage::{
    CommentRepository, Pagination, PostRepository, RepositoryError, Result, UserRepository,
};

use super::conversions::{ids_to_json, rows_into, CommentRow, PostRow, UserRow};
use super::error::map_sqlx_error;
use super::schema;
use crate::config::Config;
use crate::storage::hash_password;

/// SQLite-based repository implementation.
///
/// Cloning is cheap and shares the underlying pool.
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Opens (creating if missing) the database file named in `config`.
    ///
    /// Schema tables are created automatically.
    pub async fn connect(config: &Config) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(&config.sqlite_path)
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.sqlite_max_connections)
            .acquire_timeout(config.sqlite_acquire_timeout())
            .connect_with(options)
            .await
            .map_err(|e| map_sqlx_error(e, "Database", &config.sqlite_path))?;

        tracing::info!(
            path = %config.sqlite_path,
            max_connections = config.sqlite_max_connections,
            "Opened SQLite pool"
        );

        Self::new(pool).await
    }

    /// Wraps an existing pool, creating the schema if needed.
    pub async fn new(pool: SqlitePool) -> Result<Self> {
        let repo = Self { pool };
        repo.init_schema().await?;
        Ok(repo)
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the pool is dropped. The pool
    /// holds exactly one connection that never expires, since every SQLite
    /// memory connection is a separate database.
    pub async fn new_in_memory() -> Result<Self> {
        let options = "sqlite::memory:"
            .parse::<SqliteConnectOptions>()
            .map_err(|e| map_sqlx_error(e, "Database", ":memory:"))?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| map_sqlx_error(e, "Database", ":memory:"))?;

        Self::new(pool).await
    }

    /// Initialize the database schema.
    async fn init_schema(&self) -> Result<()> {
        sqlx::raw_sql(schema::CREATE_TABLES)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Database", "schema"))?;
        Ok(())
    }

    /// Closes the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn page_params(page: Pagination) -> (i64, i64) {
    (i64::from(page.limit), i64::from(page.offset))
}

// ============================================================================
// UserRepository implementation
// ============================================================================

#[async_trait]
impl UserRepository for SqliteRepository {
    async fn create_user(&self, username: &str, password: &str) -> Result<User> {
        let password_hash = hash_password(password).await?;

        let row = sqlx::query_as::<_, UserRow>(schema::INSERT_USER)
            .bind(username)
            .bind(&password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "User", username))?;

        tracing::debug!(user_id = row.id, "Inserted user");
        Ok(row.into())
    }

    async fn get_user_by_id(&self, id: i64) -> Result<User> {
        sqlx::query_as::<_, UserRow>(schema::SELECT_USER_BY_ID)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map(User::from)
            .map_err(|e| map_sqlx_error(e, "User", id))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<User> {
        sqlx::query_as::<_, UserRow>(schema::SELECT_USER_BY_USERNAME)
            .bind(username)
            .fetch_one(&self.pool)
            .await
            .map(User::from)
            .map_err(|e| map_sqlx_error(e, "User", username))
    }

    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, UserRow>(schema::SELECT_USERS_BY_IDS)
            .bind(ids_to_json(ids)?)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "User", "batch"))?;

        Ok(rows_into(rows))
    }
}

// ============================================================================
// PostRepository implementation
// ============================================================================

#[async_trait]
impl PostRepository for SqliteRepository {
    async fn create_post(
        &self,
        title: &str,
        content: &str,
        user_id: i64,
        commentable: bool,
    ) -> Result<Post> {
        let row = sqlx::query_as::<_, PostRow>(schema::INSERT_POST)
            .bind(title)
            .bind(content)
            .bind(user_id)
            .bind(commentable)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Post", "new"))?;

        tracing::debug!(post_id = row.id, user_id, "Inserted post");
        Ok(row.into())
    }

    async fn get_post_by_id(&self, id: i64) -> Result<Post> {
        sqlx::query_as::<_, PostRow>(schema::SELECT_POST_BY_ID)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map(Post::from)
            .map_err(|e| map_sqlx_error(e, "Post", id))
    }

    async fn get_posts(&self, page: Pagination) -> Result<Vec<Post>> {
        if page.is_empty() {
            return Ok(Vec::new());
        }
        let (limit, offset) = page_params(page);

        let rows = sqlx::query_as::<_, PostRow>(schema::SELECT_POSTS)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Post", "page"))?;

        Ok(rows_into(rows))
    }

    async fn get_posts_by_user(&self, user_id: i64, page: Pagination) -> Result<Vec<Post>> {
        if page.is_empty() {
            return Ok(Vec::new());
        }
        let (limit, offset) = page_params(page);

        let rows = sqlx::query_as::<_, PostRow>(schema::SELECT_POSTS_BY_USER)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Post", "page"))?;

        Ok(rows_into(rows))
    }

    async fn update_post(
        &self,
        id: i64,
        title: &str,
        content: &str,
        user_id: i64,
        commentable: bool,
    ) -> Result<Post> {
        // A foreign owner matches zero rows, which surfaces as RowNotFound.
        sqlx::query_as::<_, PostRow>(schema::UPDATE_POST)
            .bind(id)
            .bind(user_id)
            .bind(title)
            .bind(content)
            .bind(commentable)
            .fetch_one(&self.pool)
            .await
            .map(Post::from)
            .map_err(|e| map_sqlx_error(e, "Post", id))
    }

    async fn delete_post(&self, id: i64) -> Result<()> {
        let result = sqlx::query(schema::DELETE_POST)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Post", id))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found("Post", id));
        }

        tracing::debug!(post_id = id, "Deleted post");
        Ok(())
    }
}

// ============================================================================
// CommentRepository implementation
// ============================================================================

#[async_trait]
impl CommentRepository for SqliteRepository {
    async fn create_comment(
        &self,
        content: &str,
        user_id: i64,
        post_id: i64,
        parent_id: Option<i64>,
    ) -> Result<Comment> {
        let row = sqlx::query_as::<_, CommentRow>(schema::INSERT_COMMENT)
            .bind(content)
            .bind(user_id)
            .bind(post_id)
            .bind(parent_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Comment", "new"))?;

        // No row means the parent guard filtered the insert out.
        let row = row.ok_or_else(|| {
            RepositoryError::ConstraintViolation(format!(
                "parent comment {} does not exist on post {post_id}",
                parent_id.unwrap_or_default()
            ))
        })?;

        tracing::debug!(comment_id = row.id, post_id, "Inserted comment");
        Ok(row.into())
    }

    async fn get_comment_by_id(&self, id: i64) -> Result<Comment> {
        sqlx::query_as::<_, CommentRow>(schema::SELECT_COMMENT_BY_ID)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map(Comment::from)
            .map_err(|e| map_sqlx_error(e, "Comment", id))
    }

    async fn get_comments_by_post(&self, post_id: i64, page: Pagination) -> Result<Vec<Comment>> {
        if page.is_empty() {
            return Ok(Vec::new());
        }
        let (limit, offset) = page_params(page);

        let rows = sqlx::query_as::<_, CommentRow>(schema::SELECT_COMMENTS_BY_POST)
            .bind(post_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Comment", "page"))?;

        Ok(rows_into(rows))
    }

    async fn get_comments_by_posts(&self, post_ids: &[i64]) -> Result<Vec<Comment>> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, CommentRow>(schema::SELECT_COMMENTS_BY_POSTS)
            .bind(ids_to_json(post_ids)?)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Comment", "batch"))?;

        Ok(rows_into(rows))
    }

    async fn get_replies(&self, parent_id: i64) -> Result<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentRow>(schema::SELECT_REPLIES)
            .bind(parent_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Comment", parent_id))?;

        Ok(rows_into(rows))
    }

    async fn update_comment(&self, id: i64, content: &str) -> Result<Comment> {
        sqlx::query_as::<_, CommentRow>(schema::UPDATE_COMMENT)
            .bind(id)
            .bind(content)
            .fetch_one(&self.pool)
            .await
            .map(Comment::from)
            .map_err(|e| map_sqlx_error(e, "Comment", id))
    }

    async fn delete_comment(&self, id: i64) -> Result<()> {
        let result = sqlx::query(schema::DELETE_COMMENT)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Comment", id))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found("Comment", id));
        }

        tracing::debug!(comment_id = id, "Deleted comment");
        Ok(())
    }
}
