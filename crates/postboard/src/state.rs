//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. One storage engine is chosen at startup and every
//! repository handle points at that same instance, so the auth routes and
//! the content routes always observe the same users.

use std::{fmt, sync::Arc};

use clap::ValueEnum;

use postboard_core::storage::{CommentRepository, PostRepository, UserRepository};

use crate::config::Config;
use crate::storage::{InMemoryRepository, SqliteRepository};

/// Storage engine selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StorageBackend {
    /// Process-local maps; data is lost on exit.
    #[default]
    Memory,
    /// SQLite database file at `SQLITE_PATH`.
    Sqlite,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Shared application state.
///
/// This is cloned for each request handler. Cloning shares the underlying
/// engine.
#[derive(Clone)]
pub struct AppState {
    /// User repository.
    pub users: Arc<dyn UserRepository>,
    /// Post repository.
    pub posts: Arc<dyn PostRepository>,
    /// Comment repository.
    pub comments: Arc<dyn CommentRepository>,
    /// Kept so the pool can be closed on shutdown.
    sqlite: Option<SqliteRepository>,
}

impl AppState {
    /// Builds state for the chosen backend.
    pub async fn new(backend: StorageBackend, config: &Config) -> anyhow::Result<Self> {
        let state = match backend {
            StorageBackend::Memory => Self::in_memory(),
            StorageBackend::Sqlite => {
                let repo = SqliteRepository::connect(config).await?;
                let mut state = Self::from_repository(repo.clone());
                state.sqlite = Some(repo);
                state
            }
        };

        tracing::info!(backend = %backend, "Storage initialized");
        Ok(state)
    }

    /// Creates state over a fresh in-memory engine.
    pub fn in_memory() -> Self {
        Self::from_repository(InMemoryRepository::new())
    }

    /// Hands a single engine instance out behind all three repository traits.
    pub fn from_repository<R>(repo: R) -> Self
    where
        R: UserRepository + PostRepository + CommentRepository + 'static,
    {
        let repo = Arc::new(repo);
        Self {
            users: repo.clone(),
            posts: repo.clone(),
            comments: repo,
            sqlite: None,
        }
    }

    /// Releases storage resources. Safe to call more than once.
    pub async fn close(&self) {
        if let Some(repo) = &self.sqlite {
            repo.close().await;
            tracing::info!("SQLite pool closed");
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::in_memory()
    }
}
