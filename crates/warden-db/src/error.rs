//! Database errors

use thiserror::Error;

/// Database errors
#[derive(Error, Debug)]
pub enum DbError {
    /// SQLx error
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Record not found
    #[error("record not found")]
    NotFound,

    /// Unique email constraint violated (SQLSTATE 23505)
    #[error("email already exists")]
    DuplicateEmail,
}

/// Result alias for database operations
pub type DbResult<T> = Result<T, DbError>;

impl DbError {
    /// Map a sqlx error, translating unique-constraint violations on the
    /// email column into [`DbError::DuplicateEmail`].
    pub(crate) fn from_sqlx(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.code().as_deref() == Some("23505") {
                return Self::DuplicateEmail;
            }
        }
        Self::Sqlx(err)
    }
}
