//! SQLite storage backend implementation.
//!
//! This module provides a SQLite-based implementation of the repository
//! traits using an `sqlx` connection pool. Foreign keys are enforced and
//! deleting a post or comment cascades to the comments beneath it.

mod conversions;
mod error;
mod repository;
mod schema;

pub use repository::SqliteRepository;
