//! Row mapping for the `scenes` table.

use sqlx::types::Json;
use sqlx::FromRow;
use tourguide_core::scene::{Explanations, Scene};
use tourguide_core::types::DbId;

/// A row from the `scenes` table.
#[derive(Debug, Clone, FromRow)]
pub struct SceneRow {
    pub id: DbId,
    pub name: String,
    pub image_url: String,
    pub explanations: Json<Explanations>,
}

impl From<SceneRow> for Scene {
    fn from(row: SceneRow) -> Self {
        Scene {
            id: row.id,
            name: row.name,
            image_url: row.image_url,
            explanations: row.explanations.0,
        }
    }
}
