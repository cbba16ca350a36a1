mod error;
mod password;

pub use error::PasswordError;
pub use password::{hash_password, verify_password, verify_without_user};
