//! Auth errors

use thiserror::Error;

/// Authentication errors
///
/// The credential/session variants (`InvalidCredential`, `InvalidRefreshToken`,
/// `IdentityNotFound`) are collapsed into one uniform unauthorized response at
/// the API boundary so callers cannot distinguish which sub-case occurred.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Unknown email or wrong password (merged to prevent enumeration)
    #[error("invalid credentials")]
    InvalidCredential,

    /// Missing, rotated, or mismatched refresh token
    #[error("invalid refresh token")]
    InvalidRefreshToken,

    /// Internal lookup miss during refresh/sign-out
    #[error("identity not found")]
    IdentityNotFound,

    /// Create raced into an existing email
    #[error("identity already exists")]
    DuplicateIdentity,

    /// Storage collaborator I/O failure
    #[error("storage error: {0}")]
    Storage(String),

    /// Internal error (signing, hashing)
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<warden_db::DbError> for AuthError {
    fn from(err: warden_db::DbError) -> Self {
        match err {
            warden_db::DbError::NotFound => Self::IdentityNotFound,
            warden_db::DbError::DuplicateEmail => Self::DuplicateIdentity,
            warden_db::DbError::Sqlx(e) => {
                tracing::error!("Database error: {}", e);
                Self::Storage(e.to_string())
            }
        }
    }
}
