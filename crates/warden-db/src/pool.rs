//! Database connection pool

use sqlx::PgPool;
use std::time::Duration;

/// Database connection pool type alias
pub type DbPool = PgPool;

/// Connection attempts before giving up
const CONNECT_ATTEMPTS: u32 = 5;
/// Delay between connection attempts
const CONNECT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Create a new database connection pool, retrying on startup
///
/// The database is frequently not ready yet when the service container comes
/// up, so connection is retried a fixed number of times before failing.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let mut attempt = 1;
    loop {
        match PgPool::connect(database_url).await {
            Ok(pool) => return Ok(pool),
            Err(err) if attempt < CONNECT_ATTEMPTS => {
                tracing::warn!(
                    attempt,
                    max_attempts = CONNECT_ATTEMPTS,
                    error = %err,
                    "Database connection failed, retrying"
                );
                tokio::time::sleep(CONNECT_RETRY_DELAY).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
