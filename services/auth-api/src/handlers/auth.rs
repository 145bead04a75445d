//! Authentication handlers (login, refresh, sign-out, Google OAuth2)

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect};
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use warden_auth_core::Credential;
use warden_types::UserView;

use crate::cookies::{self, REFRESH_COOKIE};
use crate::error::{ApiError, ApiResult};
use crate::extractors::AuthUser;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignOutResponse {
    pub message: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/login
///
/// Exchange an email/password pair for a fresh session cookie pair
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> ApiResult<(CookieJar, Json<UserView>)> {
    let (user, tokens) = state
        .auth
        .authenticate(Credential::Password {
            email: req.email,
            password: req.password,
        })
        .await?;

    let jar = cookies::attach(jar, &tokens, state.config.auth.production);
    Ok((jar, Json(user.to_view())))
}

/// POST /auth/refresh
///
/// Rotate the session: a valid refresh token yields a brand-new token pair
/// and invalidates the presented one
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<UserView>)> {
    let token = jar
        .get(REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or(ApiError::Unauthorized)?;

    let (user, tokens) = state
        .auth
        .authenticate(Credential::RefreshToken { token })
        .await?;

    let jar = cookies::attach(jar, &tokens, state.config.auth.production);
    Ok((jar, Json(user.to_view())))
}

/// POST /auth/signout
///
/// Clear the stored refresh digest and expire both session cookies
pub async fn sign_out(
    State(state): State<AppState>,
    jar: CookieJar,
    auth_user: AuthUser,
) -> ApiResult<(CookieJar, Json<SignOutResponse>)> {
    state.auth.sign_out(auth_user.user.user_id()).await?;

    let jar = cookies::clear(jar);
    Ok((
        jar,
        Json(SignOutResponse {
            message: "Successfully signed out",
        }),
    ))
}

/// GET /auth/google
///
/// Redirect the browser to Google's consent screen
pub async fn google_login(State(state): State<AppState>) -> ApiResult<Redirect> {
    let google = state.google.as_ref().ok_or(ApiError::NotFound)?;
    Ok(Redirect::temporary(&google.authorize_url()?))
}

/// GET /auth/google/callback
///
/// Complete the OAuth2 code exchange, establish a session, and bounce the
/// browser back to the frontend
pub async fn google_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<OAuthCallbackQuery>,
) -> ApiResult<impl IntoResponse> {
    let google = state.google.as_ref().ok_or(ApiError::NotFound)?;

    if let Some(error) = query.error {
        tracing::warn!(error, "OAuth consent denied");
        return Err(ApiError::Unauthorized);
    }

    let code = query.code.ok_or(ApiError::Unauthorized)?;
    let oauth_state = query.state.ok_or(ApiError::Unauthorized)?;
    if !google.verify_state(&oauth_state) {
        return Err(ApiError::Unauthorized);
    }

    let profile = google.fetch_profile(&code).await?;

    let (user, tokens) = state
        .auth
        .authenticate(Credential::Federated { profile })
        .await?;

    let jar = cookies::attach(jar, &tokens, state.config.auth.production);
    let destination = format!(
        "{}?userId={}",
        state.config.auth.federated_redirect_url, user.public_id
    );
    Ok((jar, Redirect::temporary(&destination)))
}
