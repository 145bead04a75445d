//! Warden Auth Core - Session and credential lifecycle engine
//!
//! Core authentication functionality: token issuance, refresh-token rotation
//! with hashed server-side storage, credential verification, and the
//! orchestrator that dispatches among verification strategies.

pub mod config;
pub mod error;
pub mod federated;
pub mod hasher;
pub mod service;
pub mod session;
pub mod token;

pub use config::{AuthConfig, AuthConfigError};
pub use error::AuthError;
pub use federated::{FederatedAdapter, FederatedProfile};
pub use hasher::{ArgonHasher, CredentialHasher};
pub use service::{AuthService, Credential};
pub use session::RefreshStore;
pub use token::{Claims, TokenIssuer};
