//! In-process scene store.
//!
//! Mirrors the PostgreSQL store's contract (identity ids that are never
//! reused, id-ordered listing) without any external dependency. Selected
//! with a `memory://` connection string and used throughout the tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::CoreError;
use crate::scene::{NewScene, Scene};
use crate::store::SceneStore;
use crate::types::DbId;

#[derive(Debug, Default)]
struct Inner {
    last_id: DbId,
    rows: BTreeMap<DbId, Scene>,
    closed: bool,
}

impl Inner {
    fn ensure_open(&self) -> Result<(), CoreError> {
        if self.closed {
            return Err(CoreError::StoreUnavailable("store has been closed".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemorySceneStore {
    inner: RwLock<Inner>,
}

impl MemorySceneStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored scenes.
    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SceneStore for MemorySceneStore {
    async fn insert(&self, scene: &NewScene) -> Result<Scene, CoreError> {
        let mut inner = self.inner.write().await;
        inner.ensure_open()?;
        inner.last_id += 1;
        let stored = scene.clone().into_scene(inner.last_id);
        inner.rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: DbId, scene: &NewScene) -> Result<Option<Scene>, CoreError> {
        let mut inner = self.inner.write().await;
        inner.ensure_open()?;
        Ok(inner.rows.get_mut(&id).map(|row| {
            *row = scene.clone().into_scene(id);
            row.clone()
        }))
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        let mut inner = self.inner.write().await;
        inner.ensure_open()?;
        Ok(inner.rows.remove(&id).is_some())
    }

    async fn list_all(&self) -> Result<Vec<Scene>, CoreError> {
        let inner = self.inner.read().await;
        inner.ensure_open()?;
        Ok(inner.rows.values().cloned().collect())
    }

    async fn get_by_id(&self, id: DbId) -> Result<Option<Scene>, CoreError> {
        let inner = self.inner.read().await;
        inner.ensure_open()?;
        Ok(inner.rows.get(&id).cloned())
    }

    async fn health_check(&self) -> Result<(), CoreError> {
        self.inner.read().await.ensure_open()
    }

    async fn close(&self) {
        self.inner.write().await.closed = true;
        tracing::debug!("In-memory scene store closed");
    }
}
