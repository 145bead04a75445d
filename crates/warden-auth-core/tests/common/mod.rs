//! Shared test fixtures

pub mod mock_repos;

use std::sync::Arc;

use warden_auth_core::{ArgonHasher, AuthConfig, AuthService, CredentialHasher};
use warden_db::{CreateUser, UserRepository, UserRow};

use mock_repos::MockUserRepository;

/// Auth config with short but realistic lifetimes
pub fn test_config() -> AuthConfig {
    AuthConfig::try_new(
        "access-secret-for-integration-tests",
        15 * 60 * 1000,
        "refresh-secret-for-integration-tests",
        7 * 24 * 3600 * 1000,
        "http://localhost:3000/auth",
        false,
    )
    .expect("test config is valid")
}

/// Build an auth service over the given mock repository
pub fn test_service(
    repo: Arc<MockUserRepository>,
) -> AuthService<MockUserRepository, ArgonHasher> {
    AuthService::new(&test_config(), repo, Arc::new(ArgonHasher))
}

/// Seed a password-based identity and return its row
pub async fn seed_password_user(
    repo: &MockUserRepository,
    email: &str,
    password: &str,
) -> UserRow {
    let digest = ArgonHasher.hash(password).expect("hashing succeeds");
    repo.create(CreateUser {
        public_id: uuid::Uuid::new_v4(),
        email: email.to_string(),
        password_hash: Some(digest),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        avatar_url: None,
    })
    .await
    .expect("seed user created")
}
