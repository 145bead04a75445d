//! Token issuance: HS256 access/refresh JWT pairs
//!
//! Both tokens carry the same claim shape but are signed with independent
//! secrets and lifetimes. The issuer performs no I/O and has no side effects;
//! it is pure given (identity id, secrets, now).

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use warden_types::{TokenPair, UserId};

use crate::config::AuthConfig;
use crate::AuthError;

/// JWT claims embedded in both token kinds
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal id
    pub sub: i64,
    /// Issued-at time (UTC Unix timestamp)
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp)
    pub exp: i64,
    /// Unique token identifier (UUID v4); makes two pairs minted for the same
    /// identity distinguishable even within one clock second
    pub jti: String,
}

impl Claims {
    /// Get the user ID from the subject claim
    pub fn user_id(&self) -> UserId {
        UserId(self.sub)
    }
}

/// Mints and verifies the access/refresh token pair
#[derive(Clone)]
pub struct TokenIssuer {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    access_ttl: ChronoDuration,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    refresh_ttl: ChronoDuration,
}

impl TokenIssuer {
    /// Create a token issuer from the auth config
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(config.access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(config.access_secret.as_bytes()),
            access_ttl: ChronoDuration::milliseconds(config.access_ttl.as_millis() as i64),
            refresh_encoding: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            refresh_ttl: ChronoDuration::milliseconds(config.refresh_ttl.as_millis() as i64),
        }
    }

    /// Mint a fresh access/refresh pair for the given identity
    pub fn issue_pair(&self, user_id: UserId) -> Result<TokenPair, AuthError> {
        let now = Utc::now();
        let access_expires_at = now + self.access_ttl;
        let refresh_expires_at = now + self.refresh_ttl;

        let access_token = sign(user_id, now, access_expires_at, &self.access_encoding)?;
        let refresh_token = sign(user_id, now, refresh_expires_at, &self.refresh_encoding)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at,
            refresh_expires_at,
        })
    }

    /// Verify an access token and return its claims
    pub fn decode_access(&self, token: &str) -> Result<Claims, AuthError> {
        decode_with(token, &self.access_decoding).ok_or(AuthError::InvalidCredential)
    }

    /// Verify a refresh token and return its claims
    pub fn decode_refresh(&self, token: &str) -> Result<Claims, AuthError> {
        decode_with(token, &self.refresh_decoding).ok_or(AuthError::InvalidRefreshToken)
    }
}

fn sign(
    user_id: UserId,
    now: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    key: &EncodingKey,
) -> Result<String, AuthError> {
    let claims = Claims {
        sub: user_id.0,
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
        jti: Uuid::new_v4().to_string(),
    };

    encode(&Header::default(), &claims, key)
        .map_err(|e| AuthError::Internal(format!("token signing failed: {e}")))
}

fn decode_with(token: &str, key: &DecodingKey) -> Option<Claims> {
    // No expiry leeway: a token is invalid the instant its exp passes,
    // matching the cookie's own Expires attribute.
    let mut validation = Validation::default(); // HS256
    validation.leeway = 0;

    decode::<Claims>(token, key, &validation)
        .ok()
        .map(|data| data.claims)
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}
