//! PostgreSQL persistence for scenes.
//!
//! Pool lifecycle (connect with retry, migrate, close), the `scenes`
//! repository and [`store::PgSceneStore`], the SQL implementation of
//! [`tourguide_core::store::SceneStore`].

use sqlx::postgres::PgPoolOptions;

pub mod config;
pub mod models;
pub mod repositories;
pub mod store;

pub use config::{DbConfig, DbConfigError};
pub use store::PgSceneStore;

pub type DbPool = sqlx::PgPool;

/// Create a bounded connection pool and open one connection to verify it.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.connect_timeout)
        .idle_timeout(config.idle_timeout)
        .connect(&config.url)
        .await
}

/// Create the pool, retrying with exponential backoff.
///
/// Makes `1 + config.connect_retries` attempts in total and returns the
/// last error once they are exhausted.
pub async fn connect_with_retry(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    let mut attempt = 0;
    loop {
        match create_pool(config).await {
            Ok(pool) => {
                tracing::info!(attempt = attempt + 1, "Connected to database");
                return Ok(pool);
            }
            Err(err) if attempt < config.connect_retries => {
                let delay = config.retry_delay(attempt);
                tracing::warn!(
                    error = %err,
                    attempt = attempt + 1,
                    max_attempts = config.connect_retries + 1,
                    delay_ms = delay.as_millis() as u64,
                    "Failed to connect to database, retrying",
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => {
                tracing::error!(
                    error = %err,
                    attempts = attempt + 1,
                    "Giving up connecting to database",
                );
                return Err(err);
            }
        }
    }
}

/// Run a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
