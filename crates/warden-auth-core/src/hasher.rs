//! Credential hashing behind a swappable trait
//!
//! All digests use Argon2id with a cryptographically random salt generated via
//! [`OsRng`]. The PHC string format is used for storage so that algorithm
//! parameters and salt are embedded in the digest itself. The same hasher
//! covers both password digests and refresh-token digests.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use thiserror::Error;

/// Hashing failure (malformed digest, backend error)
#[derive(Error, Debug)]
#[error("credential hashing failed")]
pub struct HashError;

/// One-way credential hashing capability
///
/// Abstracted so the concrete algorithm can be swapped without touching flow
/// logic. Implementations must use a salted, constant-time comparison.
pub trait CredentialHasher: Send + Sync {
    /// Hash a plaintext credential into a storable digest
    fn hash(&self, plain: &str) -> Result<String, HashError>;

    /// Verify a plaintext credential against a stored digest
    ///
    /// Returns `Ok(false)` on mismatch; `Err` only for malformed digests or
    /// backend failures.
    fn verify(&self, plain: &str, digest: &str) -> Result<bool, HashError>;
}

/// Argon2id implementation of [`CredentialHasher`]
#[derive(Debug, Clone, Default)]
pub struct ArgonHasher;

impl CredentialHasher for ArgonHasher {
    fn hash(&self, plain: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|_| HashError)?;
        Ok(hash.to_string())
    }

    fn verify(&self, plain: &str, digest: &str) -> Result<bool, HashError> {
        let parsed = PasswordHash::new(digest).map_err(|_| HashError)?;
        match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(_) => Err(HashError),
        }
    }
}
