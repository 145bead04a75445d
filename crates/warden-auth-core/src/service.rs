//! Auth orchestrator - strategy dispatch and the four session flows
//!
//! An inbound authentication attempt moves through
//! `Unauthenticated -> VerifyingCredential -> {Authenticated, Rejected}`.
//! The [`Credential`] variant selects which verification strategy resolves the
//! identity; [`AuthService::authenticate`] then drives issuance and
//! persistence. Cookie transport happens in the HTTP layer, only after this
//! service returns success, so tokens from a partially failed flow are never
//! attached.

use std::sync::Arc;

use warden_db::{UserRepository, UserRow};
use warden_types::{TokenPair, UserId};

use crate::{
    config::AuthConfig,
    federated::{FederatedAdapter, FederatedProfile},
    hasher::CredentialHasher,
    session::RefreshStore,
    token::TokenIssuer,
    AuthError,
};

/// A credential presented by an inbound request, tagged by verification
/// strategy
#[derive(Debug, Clone)]
pub enum Credential {
    /// Password login
    Password { email: String, password: String },
    /// A bearer access token (cookie or Authorization header)
    AccessToken { token: String },
    /// The refresh cookie presented to obtain a new pair
    RefreshToken { token: String },
    /// A verified external-provider profile from the OAuth2 callback
    Federated { profile: FederatedProfile },
}

/// Authentication service
///
/// Composes the credential verifier, token issuer, refresh store, and
/// federated adapter into the login / refresh / federated-login / sign-out
/// flows.
pub struct AuthService<R: UserRepository, H: CredentialHasher> {
    issuer: TokenIssuer,
    store: RefreshStore<R, H>,
    adapter: FederatedAdapter<R>,
    repo: Arc<R>,
    hasher: Arc<H>,
}

impl<R: UserRepository, H: CredentialHasher> AuthService<R, H> {
    /// Create a new auth service over the injected storage and hasher
    pub fn new(config: &AuthConfig, repo: Arc<R>, hasher: Arc<H>) -> Self {
        Self {
            issuer: TokenIssuer::new(config),
            store: RefreshStore::new(Arc::clone(&repo), Arc::clone(&hasher)),
            adapter: FederatedAdapter::new(Arc::clone(&repo)),
            repo,
            hasher,
        }
    }

    /// Dispatch the credential to its verification strategy and resolve the
    /// identity
    pub async fn resolve_identity(&self, credential: Credential) -> Result<UserRow, AuthError> {
        match credential {
            Credential::Password { email, password } => {
                self.verify_password(&email, &password).await
            }
            Credential::AccessToken { token } => {
                let claims = self.issuer.decode_access(&token)?;
                self.repo
                    .find_by_id(claims.sub)
                    .await?
                    .ok_or(AuthError::IdentityNotFound)
            }
            Credential::RefreshToken { token } => {
                // The subject comes from the refresh JWT's own verified
                // claims, then the candidate is checked against the stored
                // digest. A rotated token fails the digest compare.
                let claims = self.issuer.decode_refresh(&token)?;
                self.store.verify(claims.user_id(), &token).await
            }
            Credential::Federated { profile } => self.adapter.resolve(&profile).await,
        }
    }

    /// Full authentication flow: resolve identity, mint a pair, and rotate the
    /// stored refresh digest
    ///
    /// The pair is returned only after the rotated digest is durably
    /// persisted; a persistence failure aborts the flow and the caller must
    /// not attach cookies. On the refresh path the rotation is conditional on
    /// the digest the verify step matched, so two concurrent refreshes of the
    /// same token resolve to exactly one winner.
    pub async fn authenticate(
        &self,
        credential: Credential,
    ) -> Result<(UserRow, TokenPair), AuthError> {
        let is_refresh = matches!(credential, Credential::RefreshToken { .. });
        let user = self.resolve_identity(credential).await?;

        let pair = self.issuer.issue_pair(user.user_id())?;
        if is_refresh {
            let observed = user
                .refresh_token_hash
                .as_deref()
                .ok_or(AuthError::InvalidRefreshToken)?;
            self.store
                .rotate(user.user_id(), observed, &pair.refresh_token)
                .await?;
        } else {
            self.store.persist(user.user_id(), &pair.refresh_token).await?;
        }

        Ok((user, pair))
    }

    /// Sign out: clear the stored refresh digest
    ///
    /// Idempotent; calling it for a user with no active session still
    /// succeeds.
    pub async fn sign_out(&self, user_id: UserId) -> Result<(), AuthError> {
        self.store.revoke(user_id).await
    }

    /// Password strategy: the credential verifier
    ///
    /// Unknown email, NULL password hash (federated-only identity), and wrong
    /// password all return the same `InvalidCredential` so the caller gets no
    /// user-enumeration signal. The stored digest never appears in errors or
    /// logs.
    async fn verify_password(&self, email: &str, password: &str) -> Result<UserRow, AuthError> {
        let user = self
            .repo
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredential)?;

        let digest = user
            .password_hash
            .as_deref()
            .ok_or(AuthError::InvalidCredential)?;

        match self.hasher.verify(password, digest) {
            Ok(true) => Ok(user),
            Ok(false) => Err(AuthError::InvalidCredential),
            Err(e) => {
                tracing::error!(user_id = user.id, "Password digest compare failed: {}", e);
                Err(AuthError::InvalidCredential)
            }
        }
    }
}

impl<R: UserRepository, H: CredentialHasher> std::fmt::Debug for AuthService<R, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}
