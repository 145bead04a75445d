//! Refresh-token store: rotation by overwrite
//!
//! At most one refresh-token digest is valid per identity at any time. Every
//! successful login or refresh overwrites the stored digest, which makes the
//! previous refresh token permanently unusable the instant a new one is
//! issued. Login overwrites unconditionally; refresh rotates through a
//! compare-and-set on the digest it verified, so concurrent refreshes of the
//! same token cannot both succeed.

use std::sync::Arc;

use warden_db::{UpdateUser, UserRepository, UserRow};
use warden_types::UserId;

use crate::hasher::CredentialHasher;
use crate::AuthError;

/// Persists and checks the per-user refresh-token digest
pub struct RefreshStore<R: UserRepository, H: CredentialHasher> {
    repo: Arc<R>,
    hasher: Arc<H>,
}

impl<R: UserRepository, H: CredentialHasher> RefreshStore<R, H> {
    /// Create a new refresh store over the injected repository and hasher
    pub fn new(repo: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repo, hasher }
    }

    /// Digest the refresh token and write it onto the identity record,
    /// overwriting any previous digest (rotation)
    pub async fn persist(&self, user_id: UserId, refresh_token: &str) -> Result<(), AuthError> {
        let digest = self.hasher.hash(refresh_token).map_err(|e| {
            tracing::error!(user_id = user_id.0, "Failed to digest refresh token: {}", e);
            AuthError::Internal("refresh token digest failed".to_string())
        })?;

        self.repo
            .update(user_id.0, UpdateUser::set_refresh_hash(digest))
            .await?;

        Ok(())
    }

    /// Rotate the digest, but only if the slot still holds `observed_digest`
    ///
    /// This is the refresh-path counterpart of [`RefreshStore::persist`]: the
    /// write is conditional on the digest the verify step matched, so of two
    /// concurrent refreshes presenting the same superseded token, exactly one
    /// rotation lands and the loser fails with `InvalidRefreshToken`.
    pub async fn rotate(
        &self,
        user_id: UserId,
        observed_digest: &str,
        refresh_token: &str,
    ) -> Result<(), AuthError> {
        let digest = self.hasher.hash(refresh_token).map_err(|e| {
            tracing::error!(user_id = user_id.0, "Failed to digest refresh token: {}", e);
            AuthError::Internal("refresh token digest failed".to_string())
        })?;

        let swapped = self
            .repo
            .swap_refresh_hash(user_id.0, observed_digest, &digest)
            .await?;

        if !swapped {
            tracing::debug!(user_id = user_id.0, "Lost refresh rotation race");
            return Err(AuthError::InvalidRefreshToken);
        }
        Ok(())
    }

    /// Check a candidate refresh token against the stored digest
    ///
    /// Succeeds only if a digest exists and matches. Every failure on this
    /// path, including storage errors, surfaces as `InvalidRefreshToken` so
    /// callers cannot probe which identities exist.
    pub async fn verify(&self, user_id: UserId, candidate: &str) -> Result<UserRow, AuthError> {
        let user = self
            .repo
            .find_by_id(user_id.0)
            .await
            .map_err(|e| {
                tracing::error!(user_id = user_id.0, "Refresh lookup failed: {}", e);
                AuthError::InvalidRefreshToken
            })?
            .ok_or(AuthError::InvalidRefreshToken)?;

        let stored = user
            .refresh_token_hash
            .as_deref()
            .ok_or(AuthError::InvalidRefreshToken)?;

        match self.hasher.verify(candidate, stored) {
            Ok(true) => Ok(user),
            Ok(false) => Err(AuthError::InvalidRefreshToken),
            Err(e) => {
                tracing::error!(user_id = user_id.0, "Refresh digest compare failed: {}", e);
                Err(AuthError::InvalidRefreshToken)
            }
        }
    }

    /// Clear the stored digest, ending the session
    ///
    /// Idempotent: clearing an already-empty slot succeeds.
    pub async fn revoke(&self, user_id: UserId) -> Result<(), AuthError> {
        self.repo
            .update(user_id.0, UpdateUser::clear_refresh_hash())
            .await?;

        Ok(())
    }
}

impl<R: UserRepository, H: CredentialHasher> std::fmt::Debug for RefreshStore<R, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshStore").finish_non_exhaustive()
    }
}
