//! Session transport: the two auth cookies
//!
//! These helpers are the only writes to the response cookie jar in the
//! service. `attach` is called exactly once per successful login/refresh,
//! `clear` exactly once per sign-out.

use axum_extra::extract::cookie::{Cookie, CookieJar};
use chrono::{DateTime, Utc};
use time::OffsetDateTime;

use warden_types::TokenPair;

/// Cookie carrying the access token
pub const AUTH_COOKIE: &str = "Authentication";
/// Cookie carrying the refresh token
pub const REFRESH_COOKIE: &str = "Refresh";

/// Set both session cookies, each expiring at its token's expiry instant
pub fn attach(jar: CookieJar, tokens: &TokenPair, production: bool) -> CookieJar {
    jar.add(session_cookie(
        AUTH_COOKIE,
        tokens.access_token.clone(),
        tokens.access_expires_at,
        production,
    ))
    .add(session_cookie(
        REFRESH_COOKIE,
        tokens.refresh_token.clone(),
        tokens.refresh_expires_at,
        production,
    ))
}

/// Remove both session cookies
pub fn clear(jar: CookieJar) -> CookieJar {
    jar.remove(removal_cookie(AUTH_COOKIE))
        .remove(removal_cookie(REFRESH_COOKIE))
}

fn session_cookie(
    name: &'static str,
    value: String,
    expires_at: DateTime<Utc>,
    production: bool,
) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, value);
    cookie.set_http_only(true);
    cookie.set_secure(production);
    cookie.set_path("/");
    cookie.set_expires(OffsetDateTime::from_unix_timestamp(expires_at.timestamp()).ok());
    cookie
}

// Removal must match the path the cookie was set with.
fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::from(name);
    cookie.set_path("/");
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn test_pair() -> TokenPair {
        let now = Utc::now();
        TokenPair {
            access_token: "access.jwt.value".to_string(),
            refresh_token: "refresh.jwt.value".to_string(),
            access_expires_at: now + Duration::minutes(15),
            refresh_expires_at: now + Duration::days(7),
        }
    }

    #[test]
    fn test_attach_sets_both_cookies_http_only() {
        let jar = attach(CookieJar::new(), &test_pair(), false);

        let auth = jar.get(AUTH_COOKIE).unwrap();
        assert_eq!(auth.value(), "access.jwt.value");
        assert_eq!(auth.http_only(), Some(true));
        assert_eq!(auth.secure(), Some(false));
        assert_eq!(auth.path(), Some("/"));
        assert!(auth.expires().is_some());

        let refresh = jar.get(REFRESH_COOKIE).unwrap();
        assert_eq!(refresh.value(), "refresh.jwt.value");
        assert_eq!(refresh.http_only(), Some(true));
    }

    #[test]
    fn test_secure_flag_follows_production() {
        let jar = attach(CookieJar::new(), &test_pair(), true);
        assert_eq!(jar.get(AUTH_COOKIE).unwrap().secure(), Some(true));
        assert_eq!(jar.get(REFRESH_COOKIE).unwrap().secure(), Some(true));
    }

    #[test]
    fn test_cookie_expiry_matches_token_expiry() {
        let pair = test_pair();
        let jar = attach(CookieJar::new(), &pair, false);

        let expires = jar
            .get(REFRESH_COOKIE)
            .unwrap()
            .expires_datetime()
            .unwrap();
        assert_eq!(
            expires.unix_timestamp(),
            pair.refresh_expires_at.timestamp()
        );
    }

    #[test]
    fn test_clear_removes_both_cookies() {
        let jar = attach(CookieJar::new(), &test_pair(), false);
        let jar = clear(jar);

        // The jar still carries removal cookies, but their values are empty
        // and their expiry is in the past.
        for name in [AUTH_COOKIE, REFRESH_COOKIE] {
            let cookie = jar.get(name);
            assert!(cookie.is_none() || cookie.unwrap().value().is_empty());
        }
    }
}
