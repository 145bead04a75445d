//! Configuration for the Auth API service.

use warden_auth_core::AuthConfig;

/// Auth API configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub port: u16,

    /// Database URL
    pub database_url: String,

    /// Allowed CORS origins (credentials enabled)
    pub cors_origins: Vec<String>,

    /// Auth engine configuration
    pub auth: AuthConfig,

    /// Google OAuth2 configuration; the federated login routes are served
    /// only when this is present
    pub google: Option<GoogleConfig>,
}

/// Google OAuth2 client configuration
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let cors_origins = std::env::var("CORS_ORIGIN")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let access_secret = std::env::var("ACCESS_TOKEN_SECRET")
            .map_err(|_| ConfigError::Missing("ACCESS_TOKEN_SECRET"))?;
        let access_ttl_ms: u64 = std::env::var("ACCESS_TOKEN_TTL_MS")
            .map_err(|_| ConfigError::Missing("ACCESS_TOKEN_TTL_MS"))?
            .parse()
            .map_err(|_| ConfigError::Invalid("ACCESS_TOKEN_TTL_MS"))?;

        let refresh_secret = std::env::var("REFRESH_TOKEN_SECRET")
            .map_err(|_| ConfigError::Missing("REFRESH_TOKEN_SECRET"))?;
        let refresh_ttl_ms: u64 = std::env::var("REFRESH_TOKEN_TTL_MS")
            .map_err(|_| ConfigError::Missing("REFRESH_TOKEN_TTL_MS"))?
            .parse()
            .map_err(|_| ConfigError::Invalid("REFRESH_TOKEN_TTL_MS"))?;

        let federated_redirect_url = std::env::var("FEDERATED_LOGIN_REDIRECT_URL")
            .map_err(|_| ConfigError::Missing("FEDERATED_LOGIN_REDIRECT_URL"))?;

        let production = std::env::var("ENVIRONMENT")
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        let auth = AuthConfig::try_new(
            access_secret,
            access_ttl_ms,
            refresh_secret,
            refresh_ttl_ms,
            federated_redirect_url,
            production,
        )?;

        let google = Self::google_from_env()?;

        Ok(Self {
            port,
            database_url,
            cors_origins,
            auth,
            google,
        })
    }

    /// The Google OAuth2 client needs all three variables; none configured
    /// means the federated routes are simply not served, a partial set is a
    /// startup error.
    fn google_from_env() -> Result<Option<GoogleConfig>, ConfigError> {
        let client_id = std::env::var("GOOGLE_AUTH_CLIENT_ID").ok();
        let client_secret = std::env::var("GOOGLE_AUTH_CLIENT_SECRET").ok();
        let redirect_uri = std::env::var("GOOGLE_AUTH_REDIRECT_URI").ok();

        match (client_id, client_secret, redirect_uri) {
            (Some(client_id), Some(client_secret), Some(redirect_uri)) => Ok(Some(GoogleConfig {
                client_id,
                client_secret,
                redirect_uri,
            })),
            (None, None, None) => Ok(None),
            (id, secret, _) => {
                let missing = if id.is_none() {
                    "GOOGLE_AUTH_CLIENT_ID"
                } else if secret.is_none() {
                    "GOOGLE_AUTH_CLIENT_SECRET"
                } else {
                    "GOOGLE_AUTH_REDIRECT_URI"
                };
                Err(ConfigError::Missing(missing))
            }
        }
    }
}

/// Configuration error (fatal at startup)
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),

    #[error("Auth config error: {0}")]
    Auth(#[from] warden_auth_core::AuthConfigError),
}
