//! Warden Types - Shared domain types
//!
//! This crate contains domain types used across Warden services:
//! - User identity and the public user view
//! - Issued token pairs

pub mod token;
pub mod user;

pub use token::*;
pub use user::*;
