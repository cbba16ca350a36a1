pub mod auth;
pub mod comments;
pub mod error;
pub mod feed;
pub mod health;
pub mod posts;
pub mod users;

pub use error::{AppError, RequestError};
