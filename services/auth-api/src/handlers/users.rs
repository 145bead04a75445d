//! User handlers (registration and lookup)

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use warden_auth_core::CredentialHasher;
use warden_db::{CreateUser, UserRepository};
use warden_types::UserView;

use crate::error::{ApiError, ApiResult};
use crate::extractors::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,

    #[validate(custom(function = strong_password))]
    pub password: String,

    #[validate(length(min = 1, message = "firstName must not be empty"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "lastName must not be empty"))]
    pub last_name: String,

    pub avatar: Option<String>,
}

/// POST /users
///
/// Register a password identity; the digest is computed here so the raw
/// password never crosses into the storage layer
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserView>)> {
    req.validate().map_err(|e| ApiError::Validation(flatten(e)))?;

    let password_hash = state
        .hasher
        .hash(&req.password)
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {e}")))?;

    let user = state
        .users
        .create(CreateUser {
            public_id: Uuid::new_v4(),
            email: req.email,
            password_hash: Some(password_hash),
            first_name: req.first_name,
            last_name: req.last_name,
            avatar_url: req.avatar,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user.to_view())))
}

/// GET /users/uuid/{uuid}
///
/// Look up a user by public identifier; requires a valid access token
pub async fn get_user_by_uuid(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(uuid): Path<Uuid>,
) -> ApiResult<Json<UserView>> {
    let user = state
        .users
        .find_by_public_id(uuid)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(user.to_view()))
}

/// Password strength rule: at least 8 characters with an uppercase letter, a
/// lowercase letter, a digit, and a special character
fn strong_password(password: &str) -> Result<(), ValidationError> {
    let long_enough = password.chars().count() >= 8;
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| !c.is_ascii_alphanumeric());

    if long_enough && has_upper && has_lower && has_digit && has_special {
        Ok(())
    } else {
        Err(ValidationError::new("strong_password").with_message(
            "password must be at least 8 characters and contain an uppercase letter, \
             a lowercase letter, a number, and a special character"
                .into(),
        ))
    }
}

fn flatten(errors: validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}
