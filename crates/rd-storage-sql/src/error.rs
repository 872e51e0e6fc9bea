//! SQL storage error types.

use rd_storage::StorageError;
use sqlx::Error as SqlxError;

/// Converts a `sqlx` error to a storage error.
///
/// Connection-level failures map to `StorageError::Unavailable` so the
/// directory core can surface them as a distinct kind; everything else
/// is a query or internal error.
#[allow(clippy::needless_pass_by_value)]
pub fn from_sqlx_error(err: SqlxError) -> StorageError {
    match err {
        SqlxError::PoolTimedOut => StorageError::unavailable("connection pool timeout"),
        SqlxError::PoolClosed => StorageError::unavailable("connection pool closed"),
        SqlxError::Io(e) => StorageError::unavailable(e.to_string()),
        SqlxError::Database(db_err) => StorageError::Query(db_err.to_string()),
        _ => StorageError::Internal(err.to_string()),
    }
}
