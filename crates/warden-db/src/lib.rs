//! Warden DB - Database abstractions
//!
//! SQLx-based storage collaborator for the Warden auth service.
//!
//! # Example
//!
//! ```rust,ignore
//! use warden_db::{create_pool, PgUserRepository, UserRepository};
//!
//! let pool = create_pool("postgres://localhost/warden").await?;
//! let users = PgUserRepository::new(pool);
//!
//! let user = users.find_by_email("user@example.com").await?;
//! ```

pub mod error;
pub mod models;
pub mod pg;
pub mod pool;
pub mod repo;

pub use error::{DbError, DbResult};
pub use models::*;
pub use pg::PgUserRepository;
pub use pool::{create_pool, DbPool};
pub use repo::*;
