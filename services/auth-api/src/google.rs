//! Google OAuth2 client: authorization redirect, code exchange, profile fetch
//!
//! The `state` parameter is HMAC-signed so the callback can reject forged or
//! tampered values without any server-side session storage.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use warden_auth_core::FederatedProfile;

use crate::config::GoogleConfig;
use crate::error::ApiError;

type HmacSha256 = Hmac<Sha256>;

const AUTHORIZE_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const USERINFO_ENDPOINT: &str = "https://openidconnect.googleapis.com/v1/userinfo";

/// Google OAuth2 client
pub struct GoogleClient {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    email: Option<String>,
    #[serde(default)]
    given_name: Option<String>,
    #[serde(default)]
    family_name: Option<String>,
    #[serde(default)]
    picture: Option<String>,
}

impl GoogleClient {
    pub fn new(config: &GoogleConfig) -> Self {
        Self {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
            http: reqwest::Client::new(),
        }
    }

    /// Build the provider authorization URL with a signed CSRF state
    pub fn authorize_url(&self) -> Result<String, ApiError> {
        Ok(format!(
            "{AUTHORIZE_ENDPOINT}?client_id={}&redirect_uri={}&response_type=code&scope={}&state={}",
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode("openid email profile"),
            self.sign_state()?,
        ))
    }

    /// Verify the HMAC signature on a returned state parameter
    pub fn verify_state(&self, state: &str) -> bool {
        let Ok(bytes) = URL_SAFE_NO_PAD.decode(state) else {
            return false;
        };
        let Ok(state_str) = String::from_utf8(bytes) else {
            return false;
        };

        // Format is "nonce|timestamp_hex|signature_hex"
        let parts: Vec<&str> = state_str.splitn(3, '|').collect();
        if parts.len() != 3 {
            return false;
        }

        let payload = format!("{}|{}", parts[0], parts[1]);
        let Ok(signature) = hex::decode(parts[2]) else {
            return false;
        };

        // verify_slice compares in constant time.
        let Ok(mut mac) = HmacSha256::new_from_slice(self.client_secret.as_bytes()) else {
            return false;
        };
        mac.update(payload.as_bytes());
        if mac.verify_slice(&signature).is_err() {
            tracing::warn!("OAuth state signature mismatch");
            return false;
        }
        true
    }

    /// Exchange an authorization code for the provider profile
    pub async fn fetch_profile(&self, code: &str) -> Result<FederatedProfile, ApiError> {
        let token: TokenResponse = self
            .post_form(
                TOKEN_ENDPOINT,
                &[
                    ("code", code),
                    ("client_id", &self.client_id),
                    ("client_secret", &self.client_secret),
                    ("redirect_uri", &self.redirect_uri),
                    ("grant_type", "authorization_code"),
                ],
            )
            .await?;

        let info: UserInfo = {
            let response = self
                .http
                .get(USERINFO_ENDPOINT)
                .bearer_auth(&token.access_token)
                .send()
                .await
                .map_err(|e| ApiError::Internal(format!("userinfo request failed: {e}")))?;

            if !response.status().is_success() {
                tracing::warn!(status = %response.status(), "Userinfo fetch rejected");
                return Err(ApiError::Unauthorized);
            }

            response
                .json()
                .await
                .map_err(|e| ApiError::Internal(format!("userinfo decode failed: {e}")))?
        };

        // An email is the join key for federated identities; a profile
        // without one cannot be resolved.
        let email = info.email.ok_or(ApiError::Unauthorized)?;

        Ok(FederatedProfile {
            email,
            first_name: info.given_name.unwrap_or_default(),
            last_name: info.family_name.unwrap_or_default(),
            avatar_url: info.picture,
        })
    }

    async fn post_form<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        form: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let response = self
            .http
            .post(endpoint)
            .form(form)
            .send()
            .await
            .map_err(|e| ApiError::Internal(format!("token exchange failed: {e}")))?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "Authorization code exchange rejected");
            return Err(ApiError::Unauthorized);
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Internal(format!("token response decode failed: {e}")))
    }

    fn sign_state(&self) -> Result<String, ApiError> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();

        let payload = format!("{}|{:x}", Uuid::new_v4(), timestamp);
        let signature = self
            .compute_signature(&payload)
            .ok_or_else(|| ApiError::Internal("HMAC init failed".to_string()))?;

        Ok(URL_SAFE_NO_PAD.encode(format!("{payload}|{signature}")))
    }

    fn compute_signature(&self, payload: &str) -> Option<String> {
        let mut mac = HmacSha256::new_from_slice(self.client_secret.as_bytes()).ok()?;
        mac.update(payload.as_bytes());
        Some(hex::encode(mac.finalize().into_bytes()))
    }
}

impl std::fmt::Debug for GoogleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleClient")
            .field("client_id", &self.client_id)
            .field("redirect_uri", &self.redirect_uri)
            .finish_non_exhaustive()
    }
}
