//! HTTP handlers

mod auth;
mod health;
mod users;

pub use auth::{google_callback, google_login, login, refresh, sign_out};
pub use health::{health, ready};
pub use users::{create_user, get_user_by_uuid};
