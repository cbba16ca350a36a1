//! Storage engine implementations.
//!
//! Both engines implement every repository trait from
//! `postboard_core::storage` and are interchangeable: the composition root
//! picks one at startup and hands it out behind trait objects.
//!
//! - [`inmemory`]: process-local maps behind per-entity `RwLock`s, for
//!   development and tests.
//! - [`sqlite`]: parameterized SQL over an `sqlx` SQLite connection pool.

pub mod inmemory;
pub mod sqlite;

#[cfg(test)]
mod conformance;

pub use inmemory::InMemoryRepository;
pub use sqlite::SqliteRepository;

use postboard_core::auth;
use postboard_core::storage::{RepositoryError, Result};

/// Hashes a password on the blocking pool.
///
/// Argon2 takes tens of milliseconds; inline it would stall every other task
/// on the same runtime worker.
pub(crate) async fn hash_password(password: &str) -> Result<String> {
    let password = password.to_owned();

    let hash = tokio::task::spawn_blocking(move || auth::hash_password(&password))
        .await
        .map_err(|e| RepositoryError::Internal(format!("password hashing task failed: {e}")))??;

    Ok(hash)
}
