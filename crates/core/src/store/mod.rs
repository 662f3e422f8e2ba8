//! The persistence seam for scenes.
//!
//! [`SceneStore`] is implemented by the PostgreSQL store in `tourguide-db`
//! and by [`memory::MemorySceneStore`]. Callers hold it as
//! `Arc<dyn SceneStore>` so the concrete store is chosen once at startup.

pub mod memory;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::scene::{NewScene, Scene};
use crate::types::DbId;

/// Single-row CRUD over scenes.
///
/// Every method is one atomic statement. Implementations report
/// connectivity problems as [`CoreError::StoreUnavailable`] and any other
/// backend failure as [`CoreError::Store`]; "not found" is a value
/// (`None` / `false`), not an error.
#[async_trait]
pub trait SceneStore: Send + Sync {
    /// Persist a new scene and return it with its assigned id.
    async fn insert(&self, scene: &NewScene) -> Result<Scene, CoreError>;

    /// Replace name, image URL and explanations. `None` if `id` is absent.
    async fn update(&self, id: DbId, scene: &NewScene) -> Result<Option<Scene>, CoreError>;

    /// Remove a scene. `false` if `id` is absent.
    async fn delete(&self, id: DbId) -> Result<bool, CoreError>;

    /// All scenes, ordered by id ascending.
    async fn list_all(&self) -> Result<Vec<Scene>, CoreError>;

    async fn get_by_id(&self, id: DbId) -> Result<Option<Scene>, CoreError>;

    /// Cheap reachability check for the health endpoint.
    async fn health_check(&self) -> Result<(), CoreError> {
        Ok(())
    }

    /// Release the underlying resources. Further calls may fail.
    async fn close(&self) {}
}
