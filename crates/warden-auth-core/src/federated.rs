//! Federated identity adapter
//!
//! Exchanges a verified external-provider profile for a local identity,
//! creating the identity on first sight.

use std::sync::Arc;

use uuid::Uuid;
use warden_db::{CreateUser, DbError, UserRepository, UserRow};

use crate::AuthError;

/// Verified profile returned by an external OAuth2 provider
#[derive(Debug, Clone)]
pub struct FederatedProfile {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar_url: Option<String>,
}

/// Resolves federated profiles to local identities
pub struct FederatedAdapter<R: UserRepository> {
    repo: Arc<R>,
}

impl<R: UserRepository> FederatedAdapter<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Resolve the profile's email to a local identity, creating one on first
    /// sight
    ///
    /// Email is the join key across local and federated identities: a
    /// federated login for an email that already has a password-based identity
    /// attaches to that same identity. The provider has verified the address,
    /// which is the same trust anchor password-reset flows rely on; this
    /// shared-account behavior is a deliberate policy, not an accident.
    ///
    /// New identities are created with a NULL password hash, so they can never
    /// authenticate through the password path.
    pub async fn resolve(&self, profile: &FederatedProfile) -> Result<UserRow, AuthError> {
        if let Some(user) = self.repo.find_by_email(&profile.email).await? {
            return Ok(user);
        }

        let draft = CreateUser {
            public_id: Uuid::new_v4(),
            email: profile.email.clone(),
            password_hash: None,
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            avatar_url: profile.avatar_url.clone(),
        };

        match self.repo.create(draft).await {
            Ok(user) => Ok(user),
            // Lost a create race against a concurrent signup for the same
            // email: the winner is our identity, re-resolve it.
            Err(DbError::DuplicateEmail) => self
                .repo
                .find_by_email(&profile.email)
                .await?
                .ok_or_else(|| {
                    AuthError::Storage("identity vanished after duplicate-email race".to_string())
                }),
            Err(e) => Err(e.into()),
        }
    }
}

impl<R: UserRepository> std::fmt::Debug for FederatedAdapter<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FederatedAdapter").finish_non_exhaustive()
    }
}
