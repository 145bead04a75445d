//! PostgreSQL user repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::models::UserRow;
use crate::repo::{CreateUser, UpdateUser, UserRepository};

const USER_COLUMNS: &str = "id, public_id, email, password_hash, first_name, last_name, \
                            avatar_url, refresh_token_hash, created_at, updated_at";

/// PostgreSQL user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: i64) -> DbResult<Option<UserRow>> {
        let user = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_public_id(&self, public_id: Uuid) -> DbResult<Option<UserRow>> {
        let user = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE public_id = $1"
        ))
        .bind(public_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>> {
        let user = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, user: CreateUser) -> DbResult<UserRow> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (public_id, email, password_hash, first_name, last_name, avatar_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.public_id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.avatar_url)
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::from_sqlx)?;

        Ok(row)
    }

    async fn update(&self, id: i64, update: UpdateUser) -> DbResult<UserRow> {
        // The refresh-token slot is driven by a separate touched flag so it
        // can be explicitly set to NULL, unlike the COALESCE profile fields.
        let (touch_refresh, refresh_hash) = match update.refresh_token_hash {
            Some(slot) => (true, slot),
            None => (false, None),
        };

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                avatar_url = COALESCE($4, avatar_url),
                refresh_token_hash = CASE WHEN $5 THEN $6 ELSE refresh_token_hash END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.avatar_url)
        .bind(touch_refresh)
        .bind(&refresh_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::from_sqlx)?;

        row.ok_or(DbError::NotFound)
    }

    async fn swap_refresh_hash(&self, id: i64, expected: &str, new_hash: &str) -> DbResult<bool> {
        // The guard on the old digest makes rotation a compare-and-set: of
        // two racers that read the same digest, only one UPDATE matches.
        let result = sqlx::query(
            r#"
            UPDATE users SET
                refresh_token_hash = $3,
                updated_at = NOW()
            WHERE id = $1 AND refresh_token_hash = $2
            "#,
        )
        .bind(id)
        .bind(expected)
        .bind(new_hash)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
