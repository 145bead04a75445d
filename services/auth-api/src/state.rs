//! Application state

use std::ops::Deref;
use std::sync::Arc;

use warden_auth_core::{ArgonHasher, AuthService};
use warden_db::{DbPool, PgUserRepository};

use crate::config::Config;
use crate::google::GoogleClient;

/// Type alias for the auth service with concrete collaborator types
pub type AuthServiceImpl = AuthService<PgUserRepository, ArgonHasher>;

/// Shared database pool wrapper for health checks
#[derive(Clone)]
pub struct SharedPool(Arc<DbPool>);

impl Deref for SharedPool {
    type Target = DbPool;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Auth engine driving all four session flows
    pub auth: Arc<AuthServiceImpl>,
    /// User storage collaborator (explicit CRUD surface)
    pub users: PgUserRepository,
    /// Credential hasher (password digests on the create path)
    pub hasher: Arc<ArgonHasher>,
    /// Google OAuth2 client, when the federated flow is configured
    pub google: Option<Arc<GoogleClient>>,
    /// Database connection pool (shared reference for health checks)
    pub pool: SharedPool,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state
    pub fn new(pool: DbPool, config: Config) -> Self {
        let users = PgUserRepository::new(pool.clone());
        let hasher = Arc::new(ArgonHasher);
        let auth = Arc::new(AuthService::new(
            &config.auth,
            Arc::new(users.clone()),
            Arc::clone(&hasher),
        ));
        let google = config
            .google
            .as_ref()
            .map(|g| Arc::new(GoogleClient::new(g)));

        Self {
            auth,
            users,
            hasher,
            google,
            pool: SharedPool(Arc::new(pool)),
            config: Arc::new(config),
        }
    }
}
