//! In-memory storage backend.
//!
//! Stores every entity type in its own `BTreeMap` behind its own
//! `Arc<RwLock<_>>`. Cloning an [`InMemoryRepository`] shares the maps, so a
//! single instance built at startup and cloned into every consumer gives the
//! whole process one consistent view. Data is lost when the last clone is
//! dropped.
//!
//! # Example
//!
//! ```rust,ignore
//! use postboard::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! let auth_view = repo.clone(); // same users
//! ```

mod repository;
mod table;

pub use repository::InMemoryRepository;
