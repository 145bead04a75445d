//! End-to-end flow tests for the auth engine over in-memory storage

mod common;

use common::mock_repos::MockUserRepository;
use common::{seed_password_user, test_service};

use std::sync::Arc;

use warden_auth_core::{
    ArgonHasher, AuthError, Credential, CredentialHasher, FederatedProfile, RefreshStore,
};

fn password_credential(email: &str, password: &str) -> Credential {
    Credential::Password {
        email: email.to_string(),
        password: password.to_string(),
    }
}

fn refresh_credential(token: &str) -> Credential {
    Credential::RefreshToken {
        token: token.to_string(),
    }
}

fn google_profile(email: &str) -> FederatedProfile {
    FederatedProfile {
        email: email.to_string(),
        first_name: "Fed".to_string(),
        last_name: "User".to_string(),
        avatar_url: Some("https://lh3.example.com/photo.jpg".to_string()),
    }
}

#[tokio::test]
async fn login_issues_pair_and_persists_refresh_digest() {
    let repo = MockUserRepository::new();
    let service = test_service(repo.clone());
    let seeded = seed_password_user(&repo, "a@x.com", "Correct1!").await;

    let (user, pair) = service
        .authenticate(password_credential("a@x.com", "Correct1!"))
        .await
        .unwrap();

    assert_eq!(user.id, seeded.id);
    assert!(!pair.access_token.is_empty());
    assert!(!pair.refresh_token.is_empty());
    assert!(pair.access_expires_at < pair.refresh_expires_at);

    // The server keeps a digest of the refresh token, never the raw value.
    let stored = repo.get(user.id).unwrap().refresh_token_hash.unwrap();
    assert_ne!(stored, pair.refresh_token);
    assert!(stored.starts_with("$argon2id$"));
}

#[tokio::test]
async fn login_failure_is_uniform_for_unknown_email_and_wrong_password() {
    let repo = MockUserRepository::new();
    let service = test_service(repo.clone());
    seed_password_user(&repo, "known@x.com", "Correct1!").await;

    let unknown_email = service
        .authenticate(password_credential("nobody@x.com", "Correct1!"))
        .await
        .unwrap_err();
    let wrong_password = service
        .authenticate(password_credential("known@x.com", "Wrong1!"))
        .await
        .unwrap_err();

    assert!(matches!(unknown_email, AuthError::InvalidCredential));
    assert!(matches!(wrong_password, AuthError::InvalidCredential));
    // Identical surface: same variant, same message.
    assert_eq!(unknown_email.to_string(), wrong_password.to_string());
}

#[tokio::test]
async fn login_never_creates_identities() {
    let repo = MockUserRepository::new();
    let service = test_service(repo.clone());

    let err = service
        .authenticate(password_credential("a@x.com", "Correct1!"))
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::InvalidCredential));
    assert_eq!(repo.user_count(), 0);
}

#[tokio::test]
async fn refresh_rotates_and_replay_fails() {
    let repo = MockUserRepository::new();
    let service = test_service(repo.clone());
    seed_password_user(&repo, "a@x.com", "Correct1!").await;

    let (_, first) = service
        .authenticate(password_credential("a@x.com", "Correct1!"))
        .await
        .unwrap();

    // First refresh succeeds and yields a fresh pair.
    let (_, second) = service
        .authenticate(refresh_credential(&first.refresh_token))
        .await
        .unwrap();
    assert_ne!(first.refresh_token, second.refresh_token);
    assert_ne!(first.access_token, second.access_token);

    // The rotated token is permanently unusable.
    let replay = service
        .authenticate(refresh_credential(&first.refresh_token))
        .await
        .unwrap_err();
    assert!(matches!(replay, AuthError::InvalidRefreshToken));

    // The current token still works exactly once more.
    service
        .authenticate(refresh_credential(&second.refresh_token))
        .await
        .unwrap();
}

#[tokio::test]
async fn concurrent_refresh_of_same_token_has_one_winner() {
    let repo = MockUserRepository::new();
    let service = test_service(repo.clone());
    seed_password_user(&repo, "a@x.com", "Correct1!").await;

    let (user, pair) = service
        .authenticate(password_credential("a@x.com", "Correct1!"))
        .await
        .unwrap();

    // Two racers verify the same refresh token before either rotates; both
    // observe the same stored digest.
    let store = RefreshStore::new(repo.clone(), Arc::new(ArgonHasher));
    let seen_a = store.verify(user.user_id(), &pair.refresh_token).await.unwrap();
    let seen_b = store.verify(user.user_id(), &pair.refresh_token).await.unwrap();
    let digest_a = seen_a.refresh_token_hash.unwrap();
    let digest_b = seen_b.refresh_token_hash.unwrap();
    assert_eq!(digest_a, digest_b);

    // The first rotation lands; the second fails the compare-and-set.
    store
        .rotate(user.user_id(), &digest_a, "racer-a-next-token")
        .await
        .unwrap();
    let lost = store
        .rotate(user.user_id(), &digest_b, "racer-b-next-token")
        .await
        .unwrap_err();
    assert!(matches!(lost, AuthError::InvalidRefreshToken));

    // Only the winner's token is current.
    let stored = repo.get(user.id).unwrap().refresh_token_hash.unwrap();
    assert!(ArgonHasher.verify("racer-a-next-token", &stored).unwrap());
}

#[tokio::test]
async fn access_token_is_not_a_valid_refresh_token() {
    let repo = MockUserRepository::new();
    let service = test_service(repo.clone());
    seed_password_user(&repo, "a@x.com", "Correct1!").await;

    let (_, pair) = service
        .authenticate(password_credential("a@x.com", "Correct1!"))
        .await
        .unwrap();

    // Signed under the access secret; the refresh strategy must reject it.
    let err = service
        .authenticate(refresh_credential(&pair.access_token))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidRefreshToken));
}

#[tokio::test]
async fn refresh_for_vanished_identity_fails_like_any_bad_token() {
    let repo = MockUserRepository::new();
    let service = test_service(repo.clone());
    seed_password_user(&repo, "a@x.com", "Correct1!").await;

    let (user, pair) = service
        .authenticate(password_credential("a@x.com", "Correct1!"))
        .await
        .unwrap();

    repo.remove(user.id);

    let err = service
        .authenticate(refresh_credential(&pair.refresh_token))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidRefreshToken));
}

#[tokio::test]
async fn sign_out_clears_digest_and_is_idempotent() {
    let repo = MockUserRepository::new();
    let service = test_service(repo.clone());
    seed_password_user(&repo, "a@x.com", "Correct1!").await;

    let (user, pair) = service
        .authenticate(password_credential("a@x.com", "Correct1!"))
        .await
        .unwrap();

    service.sign_out(user.user_id()).await.unwrap();
    assert!(repo.get(user.id).unwrap().refresh_token_hash.is_none());

    // Second sign-out observes the same cleared state, no different error.
    service.sign_out(user.user_id()).await.unwrap();
    assert!(repo.get(user.id).unwrap().refresh_token_hash.is_none());

    // The refresh token issued before sign-out is dead.
    let err = service
        .authenticate(refresh_credential(&pair.refresh_token))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidRefreshToken));
}

#[tokio::test]
async fn federated_login_is_idempotent_on_email() {
    let repo = MockUserRepository::new();
    let service = test_service(repo.clone());

    let (first, _) = service
        .authenticate(Credential::Federated {
            profile: google_profile("fed@x.com"),
        })
        .await
        .unwrap();
    let (second, _) = service
        .authenticate(Credential::Federated {
            profile: google_profile("fed@x.com"),
        })
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(repo.user_count(), 1);
}

#[tokio::test]
async fn federated_login_attaches_to_existing_password_identity() {
    let repo = MockUserRepository::new();
    let service = test_service(repo.clone());
    let seeded = seed_password_user(&repo, "shared@x.com", "Correct1!").await;

    let (user, _) = service
        .authenticate(Credential::Federated {
            profile: google_profile("shared@x.com"),
        })
        .await
        .unwrap();

    // Shared account by email: same identity, password still usable.
    assert_eq!(user.id, seeded.id);
    assert!(repo.get(user.id).unwrap().password_hash.is_some());
    service
        .authenticate(password_credential("shared@x.com", "Correct1!"))
        .await
        .unwrap();
}

#[tokio::test]
async fn federated_only_identity_cannot_password_login() {
    let repo = MockUserRepository::new();
    let service = test_service(repo.clone());

    service
        .authenticate(Credential::Federated {
            profile: google_profile("fed@x.com"),
        })
        .await
        .unwrap();

    // No password digest exists; the password path must fail uniformly.
    let err = service
        .authenticate(password_credential("fed@x.com", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredential));
}

#[tokio::test]
async fn persist_failure_aborts_flow_without_tokens() {
    let repo = MockUserRepository::new();
    let service = test_service(repo.clone());
    let seeded = seed_password_user(&repo, "a@x.com", "Correct1!").await;

    repo.fail_updates(true);

    let err = service
        .authenticate(password_credential("a@x.com", "Correct1!"))
        .await
        .unwrap_err();

    // Storage failure surfaces as an internal-class error, and no digest was
    // recorded, so no caller could have attached cookies for a pair that was
    // never durably current.
    assert!(matches!(err, AuthError::Storage(_)));
    assert!(repo.get(seeded.id).unwrap().refresh_token_hash.is_none());
}

#[tokio::test]
async fn access_token_strategy_resolves_identity() {
    let repo = MockUserRepository::new();
    let service = test_service(repo.clone());
    seed_password_user(&repo, "a@x.com", "Correct1!").await;

    let (user, pair) = service
        .authenticate(password_credential("a@x.com", "Correct1!"))
        .await
        .unwrap();

    let resolved = service
        .resolve_identity(Credential::AccessToken {
            token: pair.access_token.clone(),
        })
        .await
        .unwrap();
    assert_eq!(resolved.id, user.id);

    // Garbage bearer tokens are rejected.
    let err = service
        .resolve_identity(Credential::AccessToken {
            token: "not.a.jwt".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredential));
}
