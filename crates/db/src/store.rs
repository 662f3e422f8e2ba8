//! [`SceneStore`] backed by PostgreSQL.

use async_trait::async_trait;
use tourguide_core::error::CoreError;
use tourguide_core::scene::{NewScene, Scene};
use tourguide_core::store::SceneStore;
use tourguide_core::types::DbId;

use crate::config::DbConfig;
use crate::repositories::SceneRepo;
use crate::DbPool;

/// Owns the connection pool for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct PgSceneStore {
    pool: DbPool,
}

impl PgSceneStore {
    /// Wrap an existing pool (used by tests that receive one from
    /// `#[sqlx::test]`).
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Connect with retry, verify the connection and apply migrations.
    pub async fn open(config: &DbConfig) -> Result<Self, CoreError> {
        let pool = crate::connect_with_retry(config)
            .await
            .map_err(|e| map_sqlx_error(&e))?;
        tracing::info!(
            max_connections = config.max_connections,
            "Database connection pool created"
        );

        crate::health_check(&pool)
            .await
            .map_err(|e| map_sqlx_error(&e))?;
        tracing::info!("Database health check passed");

        crate::run_migrations(&pool)
            .await
            .map_err(|e| CoreError::Store(format!("migration failed: {e}")))?;
        tracing::info!("Database migrations applied");

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl SceneStore for PgSceneStore {
    async fn insert(&self, scene: &NewScene) -> Result<Scene, CoreError> {
        SceneRepo::create(&self.pool, scene)
            .await
            .map(Scene::from)
            .map_err(|e| map_sqlx_error(&e))
    }

    async fn update(&self, id: DbId, scene: &NewScene) -> Result<Option<Scene>, CoreError> {
        SceneRepo::update(&self.pool, id, scene)
            .await
            .map(|row| row.map(Scene::from))
            .map_err(|e| map_sqlx_error(&e))
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        SceneRepo::delete(&self.pool, id)
            .await
            .map_err(|e| map_sqlx_error(&e))
    }

    async fn list_all(&self) -> Result<Vec<Scene>, CoreError> {
        SceneRepo::list(&self.pool)
            .await
            .map(|rows| rows.into_iter().map(Scene::from).collect())
            .map_err(|e| map_sqlx_error(&e))
    }

    async fn get_by_id(&self, id: DbId) -> Result<Option<Scene>, CoreError> {
        SceneRepo::find_by_id(&self.pool, id)
            .await
            .map(|row| row.map(Scene::from))
            .map_err(|e| map_sqlx_error(&e))
    }

    async fn health_check(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(&e))
    }

    async fn close(&self) {
        tracing::info!("Closing database connection pool");
        self.pool.close().await;
        tracing::info!("Database connections closed");
    }
}

/// Classify a sqlx error as a connectivity failure or a plain store error.
///
/// - Pool exhaustion, I/O, TLS and closed-pool errors are `StoreUnavailable`.
/// - Everything else, including constraint violations, is `Store`.
pub fn map_sqlx_error(err: &sqlx::Error) -> CoreError {
    match err {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => CoreError::StoreUnavailable(err.to_string()),
        sqlx::Error::Database(db_err) => {
            let code = db_err.code();
            CoreError::Store(match code.as_deref() {
                Some(code) => format!("{db_err} (SQLSTATE {code})"),
                None => db_err.to_string(),
            })
        }
        other => CoreError::Store(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn pool_timeout_is_unavailable() {
        assert_matches!(
            map_sqlx_error(&sqlx::Error::PoolTimedOut),
            CoreError::StoreUnavailable(_)
        );
        assert_matches!(
            map_sqlx_error(&sqlx::Error::PoolClosed),
            CoreError::StoreUnavailable(_)
        );
    }

    #[test]
    fn decode_failures_are_store_errors() {
        assert_matches!(
            map_sqlx_error(&sqlx::Error::RowNotFound),
            CoreError::Store(_)
        );
        assert_matches!(
            map_sqlx_error(&sqlx::Error::ColumnNotFound("explanations".into())),
            CoreError::Store(_)
        );
    }
}
