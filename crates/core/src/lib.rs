//! Core types and contracts for postboard.
//!
//! Everything in this crate is free of I/O: entity records, the repository
//! traits that storage engines implement, the error taxonomy shared by all
//! engines, and the pure helpers (pagination, reply threading, password
//! hashing) that the engines and the transport layer build on.

pub mod auth;
pub mod model;
pub mod storage;
pub mod thread;
