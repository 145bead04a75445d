//! Issued token types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Token pair returned after authentication
///
/// Never persisted; the client holds both tokens in cookies and the server
/// keeps only a one-way digest of the refresh token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Access token (short-lived)
    pub access_token: String,
    /// Refresh token (long-lived)
    pub refresh_token: String,
    /// Access token expiration instant
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration instant
    pub refresh_expires_at: DateTime<Utc>,
}
