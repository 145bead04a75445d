//! Configuration types for the auth engine

use std::time::Duration;
use thiserror::Error;

/// Auth engine configuration
///
/// Secrets and lifetimes for the two token kinds are independent: compromise
/// of one secret must not allow forging the other token.
#[derive(Clone)]
pub struct AuthConfig {
    /// Secret used to sign access tokens
    pub access_secret: String,
    /// Access token lifetime
    pub access_ttl: Duration,
    /// Secret used to sign refresh tokens
    pub refresh_secret: String,
    /// Refresh token lifetime
    pub refresh_ttl: Duration,
    /// UI URL to redirect to after a successful federated login
    pub federated_redirect_url: String,
    /// Whether the service runs in a production configuration
    /// (gates the `Secure` cookie attribute)
    pub production: bool,
}

/// Auth configuration errors (fatal at startup, never per-request)
#[derive(Error, Debug)]
pub enum AuthConfigError {
    #[error("{0} must not be empty")]
    EmptySecret(&'static str),

    #[error("{0} must be greater than zero")]
    ZeroTtl(&'static str),

    #[error("access token lifetime must be shorter than refresh token lifetime")]
    TtlOrder,
}

impl AuthConfig {
    /// Build and validate an auth config, with TTLs given in milliseconds
    pub fn try_new(
        access_secret: impl Into<String>,
        access_ttl_ms: u64,
        refresh_secret: impl Into<String>,
        refresh_ttl_ms: u64,
        federated_redirect_url: impl Into<String>,
        production: bool,
    ) -> Result<Self, AuthConfigError> {
        let access_secret = access_secret.into();
        let refresh_secret = refresh_secret.into();

        if access_secret.is_empty() {
            return Err(AuthConfigError::EmptySecret("ACCESS_TOKEN_SECRET"));
        }
        if refresh_secret.is_empty() {
            return Err(AuthConfigError::EmptySecret("REFRESH_TOKEN_SECRET"));
        }
        if access_ttl_ms == 0 {
            return Err(AuthConfigError::ZeroTtl("ACCESS_TOKEN_TTL_MS"));
        }
        if refresh_ttl_ms == 0 {
            return Err(AuthConfigError::ZeroTtl("REFRESH_TOKEN_TTL_MS"));
        }
        if access_ttl_ms >= refresh_ttl_ms {
            return Err(AuthConfigError::TtlOrder);
        }

        Ok(Self {
            access_secret,
            access_ttl: Duration::from_millis(access_ttl_ms),
            refresh_secret,
            refresh_ttl: Duration::from_millis(refresh_ttl_ms),
            federated_redirect_url: federated_redirect_url.into(),
            production,
        })
    }
}

// Manual Debug so token secrets never land in logs.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .field("federated_redirect_url", &self.federated_redirect_url)
            .field("production", &self.production)
            .finish_non_exhaustive()
    }
}
