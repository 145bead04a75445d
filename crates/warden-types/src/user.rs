//! User types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Internal user identifier (database primary key)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    /// Parse a user ID from a string
    pub fn parse(s: &str) -> Result<Self, std::num::ParseIntError> {
        Ok(Self(s.parse()?))
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Public projection of a user record
///
/// This is the only user shape that crosses the API boundary. It carries the
/// stable public identifier alongside the internal id and never includes the
/// password or refresh-token digests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    /// Internal numeric id
    pub id: i64,
    /// Stable, externally shareable identifier
    pub uuid: Uuid,
    /// Email address (unique)
    pub email: String,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Avatar URL, if set
    pub avatar: Option<String>,
    /// Record creation time
    pub created_at: DateTime<Utc>,
    /// Last record update time
    pub updated_at: DateTime<Utc>,
}
