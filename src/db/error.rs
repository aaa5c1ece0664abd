// [library] Structured error types with automatic Display and Error trait derivation
use thiserror::Error;

// [business] Failure taxonomy of the query layer - callers can tell "no row"
// apart from "the database could not answer" and map each to a status code
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Record not found")]
    NotFound, // [business] Statement succeeded but matched no row

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String), // [business] Duplicate email, unknown owner/guest id, failed CHECK

    #[error("Invalid input: {0}")]
    InvalidInput(String), // [business] Rejected before any statement was sent

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[source] sqlx::Error), // [business] Connectivity, TLS or pool exhaustion

    #[error("Storage error: {0}")]
    Storage(#[source] sqlx::Error), // [business] Any other statement failure
}

// [rust] Manual From implementation - classifies the driver error instead of wrapping it blindly
impl From<sqlx::Error> for QueryError {
    fn from(err: sqlx::Error) -> Self {
        // [library] Constraint failures are reported by PostgreSQL as database errors with a SQLSTATE
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation()
                || db_err.is_foreign_key_violation()
                || db_err.is_check_violation()
            {
                return QueryError::ConstraintViolation(db_err.message().to_string());
            }
        }

        match err {
            sqlx::Error::RowNotFound => QueryError::NotFound,
            e @ (sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed) => QueryError::StorageUnavailable(e),
            e => QueryError::Storage(e),
        }
    }
}

impl QueryError {
    // [rust] Convenience constructor for validation failures
    pub fn invalid(message: impl Into<String>) -> Self {
        QueryError::InvalidInput(message.into())
    }
}
