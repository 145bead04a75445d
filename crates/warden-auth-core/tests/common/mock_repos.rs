//! Mock repositories for testing

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use warden_db::{CreateUser, DbError, DbResult, UpdateUser, UserRepository, UserRow};

/// In-memory user repository for testing
#[derive(Default)]
pub struct MockUserRepository {
    users: DashMap<i64, UserRow>,
    by_email: DashMap<String, i64>,
    next_id: AtomicI64,
    /// When set, every update fails like a lost database connection
    fail_updates: AtomicBool,
}

impl MockUserRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make subsequent updates fail with a storage error
    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    /// Number of stored users
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Read a user row directly (bypasses the trait, for assertions)
    pub fn get(&self, id: i64) -> Option<UserRow> {
        self.users.get(&id).map(|r| r.value().clone())
    }

    /// Delete a user directly (simulates an identity vanishing mid-session)
    pub fn remove(&self, id: i64) {
        if let Some((_, user)) = self.users.remove(&id) {
            self.by_email.remove(&user.email);
        }
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: i64) -> DbResult<Option<UserRow>> {
        Ok(self.users.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_public_id(&self, public_id: Uuid) -> DbResult<Option<UserRow>> {
        Ok(self
            .users
            .iter()
            .find(|r| r.value().public_id == public_id)
            .map(|r| r.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>> {
        Ok(self
            .by_email
            .get(email)
            .and_then(|id| self.users.get(id.value()).map(|r| r.value().clone())))
    }

    async fn create(&self, user: CreateUser) -> DbResult<UserRow> {
        if self.by_email.contains_key(&user.email) {
            return Err(DbError::DuplicateEmail);
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let row = UserRow {
            id,
            public_id: user.public_id,
            email: user.email.clone(),
            password_hash: user.password_hash,
            first_name: user.first_name,
            last_name: user.last_name,
            avatar_url: user.avatar_url,
            refresh_token_hash: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.by_email.insert(user.email, id);
        self.users.insert(id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i64, update: UpdateUser) -> DbResult<UserRow> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(DbError::Sqlx(sqlx::Error::PoolClosed));
        }

        let mut user = self.users.get_mut(&id).ok_or(DbError::NotFound)?;
        if let Some(first_name) = update.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            user.last_name = last_name;
        }
        if let Some(avatar_url) = update.avatar_url {
            user.avatar_url = Some(avatar_url);
        }
        if let Some(slot) = update.refresh_token_hash {
            user.refresh_token_hash = slot;
        }
        user.updated_at = Utc::now();
        Ok(user.value().clone())
    }

    async fn swap_refresh_hash(&self, id: i64, expected: &str, new_hash: &str) -> DbResult<bool> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(DbError::Sqlx(sqlx::Error::PoolClosed));
        }

        // Compare and write under the entry guard, like the database's
        // guarded single-row UPDATE.
        let Some(mut user) = self.users.get_mut(&id) else {
            return Ok(false);
        };
        if user.refresh_token_hash.as_deref() != Some(expected) {
            return Ok(false);
        }
        user.refresh_token_hash = Some(new_hash.to_string());
        user.updated_at = Utc::now();
        Ok(true)
    }
}
