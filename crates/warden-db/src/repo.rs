//! Repository traits
//!
//! Define async repository interfaces for database operations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::UserRow;

/// User repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by internal id
    async fn find_by_id(&self, id: i64) -> DbResult<Option<UserRow>>;

    /// Find a user by public identifier
    async fn find_by_public_id(&self, public_id: Uuid) -> DbResult<Option<UserRow>>;

    /// Find a user by email
    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>>;

    /// Create a new user
    ///
    /// Fails with [`crate::DbError::DuplicateEmail`] if the email is taken.
    async fn create(&self, user: CreateUser) -> DbResult<UserRow>;

    /// Apply a partial update to a user
    ///
    /// Fails with [`crate::DbError::NotFound`] if the user does not exist.
    async fn update(&self, id: i64, update: UpdateUser) -> DbResult<UserRow>;

    /// Atomically replace the refresh-token digest, but only if the stored
    /// digest still equals `expected`
    ///
    /// Returns `false` when the stored digest no longer matches (a concurrent
    /// rotation already won) or the user does not exist. The compare and the
    /// write must be a single atomic step; two callers racing with the same
    /// `expected` digest must not both observe `true`.
    async fn swap_refresh_hash(&self, id: i64, expected: &str, new_hash: &str) -> DbResult<bool>;
}

/// Create user input
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub public_id: Uuid,
    pub email: String,
    /// PHC-format digest; `None` for federated-only identities
    pub password_hash: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub avatar_url: Option<String>,
}

/// Partial update of a user row
///
/// Profile fields follow the usual `None` = leave unchanged convention. The
/// refresh-token digest uses a nested option so it can be explicitly cleared:
/// outer `None` leaves the slot alone, `Some(None)` clears it, `Some(Some(d))`
/// overwrites it.
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_url: Option<String>,
    pub refresh_token_hash: Option<Option<String>>,
}

impl UpdateUser {
    /// Update that overwrites the refresh-token digest (rotation)
    pub fn set_refresh_hash(digest: String) -> Self {
        Self {
            refresh_token_hash: Some(Some(digest)),
            ..Self::default()
        }
    }

    /// Update that clears the refresh-token digest (sign-out)
    pub fn clear_refresh_hash() -> Self {
        Self {
            refresh_token_hash: Some(None),
            ..Self::default()
        }
    }
}
