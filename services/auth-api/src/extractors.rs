//! Axum extractors for authentication

use axum::extract::{FromRef, FromRequestParts};
use axum::http::header;
use axum::http::request::Parts;

use warden_auth_core::Credential;
use warden_db::UserRow;

use crate::cookies::AUTH_COOKIE;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user extracted from the request's access token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: UserRow,
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let token = extract_token(parts)?;

        let user = app_state
            .auth
            .resolve_identity(Credential::AccessToken { token })
            .await
            .map_err(|e| {
                tracing::debug!(error = ?e, "Access token rejected");
                ApiError::from(e)
            })?;

        Ok(AuthUser { user })
    }
}

/// Extract the access token from the session cookie or Authorization header
fn extract_token(parts: &Parts) -> Result<String, ApiError> {
    if let Some(cookie_header) = parts.headers.get(header::COOKIE) {
        let cookie_str = cookie_header.to_str().map_err(|_| ApiError::Unauthorized)?;

        for cookie in cookie_str.split(';') {
            let token = cookie
                .trim()
                .strip_prefix(AUTH_COOKIE)
                .and_then(|rest| rest.strip_prefix('='));
            if let Some(token) = token {
                return Ok(token.to_string());
            }
        }
    }

    if let Some(auth_header) = parts.headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header.to_str().map_err(|_| ApiError::Unauthorized)?;

        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            return Ok(token.to_string());
        }
    }

    Err(ApiError::Unauthorized)
}
