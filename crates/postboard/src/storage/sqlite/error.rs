//! SQLite error mapping.
//!
//! Maps `sqlx::Error` to `RepositoryError` from `postboard_core::storage`.
//! Specific errors are mapped to semantic variants (e.g., UNIQUE constraint
//! on users to `DuplicateUsername`).

use postboard_core::storage::RepositoryError;
use sqlx::error::ErrorKind;

/// Primary result codes that mean "try again later" rather than "rejected".
const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;
const SQLITE_CANTOPEN: i32 = 14;

/// Maps an sqlx error to a RepositoryError.
///
/// `key` identifies the row the statement targeted (an ID or a username)
/// and is carried into `NotFound` and `DuplicateUsername`.
///
/// # Error Mapping
///
/// - `RowNotFound` → `RepositoryError::NotFound`
/// - UNIQUE violation on a user → `RepositoryError::DuplicateUsername`
/// - Busy, locked or unopenable database → `RepositoryError::TransientIo`
/// - Any other database rejection → `RepositoryError::ConstraintViolation`
/// - I/O, TLS, protocol and pool failures → `RepositoryError::TransientIo`
/// - Everything else (decoding, configuration) → `RepositoryError::Internal`
pub fn map_sqlx_error(
    err: sqlx::Error,
    entity_type: &'static str,
    key: impl ToString,
) -> RepositoryError {
    match &err {
        sqlx::Error::RowNotFound => RepositoryError::not_found(entity_type, key),

        sqlx::Error::Database(db_err) => {
            if is_transient_code(db_err.code().as_deref()) {
                return RepositoryError::TransientIo(db_err.message().to_string());
            }
            match db_err.kind() {
                ErrorKind::UniqueViolation if entity_type == "User" => {
                    RepositoryError::DuplicateUsername(key.to_string())
                }
                _ => RepositoryError::ConstraintViolation(format!(
                    "{entity_type}: {}",
                    db_err.message()
                )),
            }
        }

        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => RepositoryError::TransientIo(err.to_string()),

        sqlx::Error::Decode(_) | sqlx::Error::ColumnDecode { .. } => {
            RepositoryError::Internal(format!("Failed to decode {entity_type}: {err}"))
        }

        _ => RepositoryError::Internal(err.to_string()),
    }
}

/// SQLite reports extended result codes; the low byte is the primary code.
fn is_transient_code(code: Option<&str>) -> bool {
    code.and_then(|c| c.parse::<i32>().ok())
        .map(|c| matches!(c & 0xff, SQLITE_BUSY | SQLITE_LOCKED | SQLITE_CANTOPEN))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;
    use std::fmt;

    use sqlx::error::DatabaseError;

    use super::*;

    /// Stand-in for a driver error so each database branch can be hit.
    #[derive(Debug)]
    struct FakeDbError {
        code: &'static str,
        unique: bool,
    }

    impl fmt::Display for FakeDbError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "fake database error {}", self.code)
        }
    }

    impl std::error::Error for FakeDbError {}

    impl DatabaseError for FakeDbError {
        fn message(&self) -> &str {
            "fake database error"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.code))
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            if self.unique {
                ErrorKind::UniqueViolation
            } else {
                ErrorKind::ForeignKeyViolation
            }
        }
    }

    fn database_error(code: &'static str, unique: bool) -> sqlx::Error {
        sqlx::Error::Database(Box::new(FakeDbError { code, unique }))
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let result = map_sqlx_error(sqlx::Error::RowNotFound, "Post", 42);

        assert_eq!(result, RepositoryError::not_found("Post", 42));
    }

    #[test]
    fn test_unique_violation_on_user_maps_to_duplicate_username() {
        // SQLITE_CONSTRAINT_UNIQUE
        let result = map_sqlx_error(database_error("2067", true), "User", "alice");

        assert_eq!(
            result,
            RepositoryError::DuplicateUsername("alice".to_string())
        );
    }

    #[test]
    fn test_foreign_key_maps_to_constraint_violation() {
        // SQLITE_CONSTRAINT_FOREIGNKEY
        let result = map_sqlx_error(database_error("787", false), "Comment", 1);

        assert!(matches!(result, RepositoryError::ConstraintViolation(_)));
    }

    #[test]
    fn test_unique_violation_elsewhere_is_constraint_violation() {
        let result = map_sqlx_error(database_error("2067", true), "Post", 1);

        assert!(matches!(result, RepositoryError::ConstraintViolation(_)));
    }

    #[test]
    fn test_busy_database_maps_to_transient_io() {
        // SQLITE_BUSY_SNAPSHOT = 5 | (2 << 8)
        let result = map_sqlx_error(database_error("517", false), "Post", 1);

        assert!(matches!(result, RepositoryError::TransientIo(_)));
    }

    #[test]
    fn test_pool_failures_map_to_transient_io() {
        for err in [
            sqlx::Error::PoolTimedOut,
            sqlx::Error::PoolClosed,
            sqlx::Error::WorkerCrashed,
            sqlx::Error::Io(std::io::Error::other("connection reset")),
        ] {
            let result = map_sqlx_error(err, "User", 1);
            assert!(
                matches!(result, RepositoryError::TransientIo(_)),
                "got {result:?}"
            );
        }
    }

    #[test]
    fn test_column_not_found_maps_to_internal() {
        let result = map_sqlx_error(
            sqlx::Error::ColumnNotFound("username".to_string()),
            "User",
            1,
        );

        assert!(matches!(result, RepositoryError::Internal(_)));
    }

    #[test]
    fn test_transient_code_parsing() {
        assert!(is_transient_code(Some("5")));
        assert!(is_transient_code(Some("6")));
        assert!(is_transient_code(Some("14")));
        assert!(!is_transient_code(Some("19")));
        assert!(!is_transient_code(Some("not-a-number")));
        assert!(!is_transient_code(None));
    }
}
