//! Repository for the `scenes` table.

use sqlx::types::Json;
use sqlx::PgPool;
use tourguide_core::scene::NewScene;
use tourguide_core::types::DbId;

use crate::models::scene::SceneRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, image_url, explanations";

/// Provides CRUD operations for scenes.
pub struct SceneRepo;

impl SceneRepo {
    /// Insert a new scene, returning the created row with its identity id.
    pub async fn create(pool: &PgPool, input: &NewScene) -> Result<SceneRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO scenes (name, image_url, explanations)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SceneRow>(&query)
            .bind(&input.name)
            .bind(&input.image_url)
            .bind(Json(&input.explanations))
            .fetch_one(pool)
            .await
    }

    /// Find a scene by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SceneRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scenes WHERE id = $1");
        sqlx::query_as::<_, SceneRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all scenes ordered by id ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<SceneRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scenes ORDER BY id ASC");
        sqlx::query_as::<_, SceneRow>(&query).fetch_all(pool).await
    }

    /// Replace every mutable column of a scene.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &NewScene,
    ) -> Result<Option<SceneRow>, sqlx::Error> {
        let query = format!(
            "UPDATE scenes SET
                name = $2,
                image_url = $3,
                explanations = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SceneRow>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.image_url)
            .bind(Json(&input.explanations))
            .fetch_optional(pool)
            .await
    }

    /// Delete a scene by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM scenes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
