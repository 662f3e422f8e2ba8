//! Scene business rules layered over a [`SceneStore`].
//!
//! Raw path and query values go in; ids and languages are validated here
//! so that bad input is rejected before any store access.

use std::sync::Arc;

use crate::error::CoreError;
use crate::language::Language;
use crate::scene::{Scene, SceneInput};
use crate::store::SceneStore;
use crate::types::DbId;
use crate::validation::{parse_language, parse_scene_id, validate_scene_input};

/// Cheaply cloneable handle shared by every request.
#[derive(Clone)]
pub struct SceneService {
    store: Arc<dyn SceneStore>,
}

impl SceneService {
    pub fn new(store: Arc<dyn SceneStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn SceneStore> {
        &self.store
    }

    /// All scenes in gallery order (id ascending).
    pub async fn list_scenes(&self) -> Result<Vec<Scene>, CoreError> {
        let scenes = self.store.list_all().await?;
        tracing::debug!(count = scenes.len(), "Listed scenes");
        Ok(scenes)
    }

    pub async fn get_scene(&self, raw_id: &str) -> Result<Scene, CoreError> {
        let id = parse_scene_id(raw_id)?;
        self.find(id).await
    }

    /// Explanation of scene `raw_id` in `raw_lang` (default `en`).
    ///
    /// A record whose requested translation is missing or blank answers with
    /// its English text. A record lacking both is reported as a store error.
    pub async fn resolve_explanation(
        &self,
        raw_id: &str,
        raw_lang: Option<&str>,
    ) -> Result<String, CoreError> {
        let id = parse_scene_id(raw_id)?;
        let language = parse_language(raw_lang)?;

        let scene = self.find(id).await?;
        if !scene.explanations.has_text(language) {
            tracing::warn!(
                scene_id = id,
                language = %language,
                "Scene is missing a translation, falling back to {}",
                Language::DEFAULT
            );
        }

        scene
            .explanations
            .resolve(language)
            .map(str::to_owned)
            .ok_or_else(|| {
                tracing::error!(scene_id = id, "Scene has no usable explanation");
                CoreError::Store(format!(
                    "scene {id} has no explanation for '{language}' or '{}'",
                    Language::DEFAULT
                ))
            })
    }

    pub async fn create_scene(&self, input: SceneInput) -> Result<Scene, CoreError> {
        let scene = validate_scene_input(input)?;
        let created = self.store.insert(&scene).await?;
        tracing::info!(scene_id = created.id, name = %created.name, "Scene created");
        Ok(created)
    }

    /// Full replace of the scene's mutable fields.
    pub async fn update_scene(&self, raw_id: &str, input: SceneInput) -> Result<Scene, CoreError> {
        let id = parse_scene_id(raw_id)?;
        let scene = validate_scene_input(input)?;
        let updated = self
            .store
            .update(id, &scene)
            .await?
            .ok_or(CoreError::SceneNotFound { id })?;
        tracing::info!(scene_id = id, "Scene updated");
        Ok(updated)
    }

    pub async fn delete_scene(&self, raw_id: &str) -> Result<(), CoreError> {
        let id = parse_scene_id(raw_id)?;
        if !self.store.delete(id).await? {
            return Err(CoreError::SceneNotFound { id });
        }
        tracing::info!(scene_id = id, "Scene deleted");
        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), CoreError> {
        self.store.health_check().await
    }

    async fn find(&self, id: DbId) -> Result<Scene, CoreError> {
        self.store
            .get_by_id(id)
            .await?
            .ok_or(CoreError::SceneNotFound { id })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use assert_matches::assert_matches;

    use super::*;
    use crate::scene::{Explanations, NewScene};
    use crate::store::memory::MemorySceneStore;

    fn input(name: &str, ja: &str, en: &str, zh: &str) -> SceneInput {
        SceneInput {
            name: Some(name.into()),
            image_url: Some("https://x/y.jpg".into()),
            explanations: Some(BTreeMap::from([
                ("ja".to_string(), ja.to_string()),
                ("en".to_string(), en.to_string()),
                ("zh".to_string(), zh.to_string()),
            ])),
        }
    }

    fn service() -> (SceneService, Arc<MemorySceneStore>) {
        let store = Arc::new(MemorySceneStore::new());
        (SceneService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn resolves_each_language_to_stored_text() {
        let (service, _) = service();
        let scene = service
            .create_scene(input("Tokyo Tower", "東京タワー", "Tokyo Tower", "东京塔"))
            .await
            .unwrap();
        let id = scene.id.to_string();

        for lang in Language::ALL {
            let text = service
                .resolve_explanation(&id, Some(lang.as_str()))
                .await
                .unwrap();
            assert_eq!(Some(text.as_str()), scene.explanations.get(lang));
        }
        assert_eq!(
            service.resolve_explanation(&id, None).await.unwrap(),
            "Tokyo Tower"
        );
    }

    #[tokio::test]
    async fn missing_translation_falls_back_to_english() {
        let (service, store) = service();
        let mut explanations = Explanations::new("あ", "A", "甲");
        explanations.remove(Language::Zh);
        let scene = store
            .insert(&NewScene {
                name: "Partial".into(),
                image_url: "https://x/y.jpg".into(),
                explanations,
            })
            .await
            .unwrap();

        let text = service
            .resolve_explanation(&scene.id.to_string(), Some("zh"))
            .await
            .unwrap();
        assert_eq!(text, "A");
    }

    #[tokio::test]
    async fn blank_translation_falls_back_to_english() {
        let (service, store) = service();
        let scene = store
            .insert(&NewScene {
                name: "Blank".into(),
                image_url: "https://x/y.jpg".into(),
                explanations: Explanations::new("", "A", "甲"),
            })
            .await
            .unwrap();

        let text = service
            .resolve_explanation(&scene.id.to_string(), Some("ja"))
            .await
            .unwrap();
        assert_eq!(text, "A");
    }

    #[tokio::test]
    async fn scene_without_any_usable_text_is_a_store_error() {
        let (service, store) = service();
        let scene = store
            .insert(&NewScene {
                name: "Empty".into(),
                image_url: "https://x/y.jpg".into(),
                explanations: Explanations::new("", "", "甲"),
            })
            .await
            .unwrap();

        assert_matches!(
            service
                .resolve_explanation(&scene.id.to_string(), Some("ja"))
                .await,
            Err(CoreError::Store(_))
        );
    }

    #[tokio::test]
    async fn unknown_scene_is_not_found() {
        let (service, _) = service();
        assert_matches!(
            service.resolve_explanation("404", Some("en")).await,
            Err(CoreError::SceneNotFound { id: 404 })
        );
    }

    #[tokio::test]
    async fn invalid_input_is_rejected_before_lookup() {
        let (service, store) = service();
        store.close().await;

        // A closed store would answer StoreUnavailable, so these prove the
        // store was never consulted.
        assert_matches!(
            service.resolve_explanation("abc", Some("en")).await,
            Err(CoreError::InvalidId(_))
        );
        assert_matches!(
            service.resolve_explanation("1", Some("fr")).await,
            Err(CoreError::InvalidLanguage(_))
        );
        assert_matches!(
            service.create_scene(SceneInput::default()).await,
            Err(CoreError::Validation(_))
        );
    }

    #[tokio::test]
    async fn update_replaces_all_fields() {
        let (service, _) = service();
        let created = service.create_scene(input("Old", "古", "Old", "旧")).await.unwrap();
        let id = created.id.to_string();

        let mut replacement = input("New", "新", "New", "新的");
        replacement.image_url = Some("https://x/new.jpg".into());
        let updated = service.update_scene(&id, replacement).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "New");
        assert_eq!(updated.image_url, "https://x/new.jpg");
        assert_eq!(updated.explanations, Explanations::new("新", "New", "新的"));
        assert_eq!(service.get_scene(&id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn update_of_missing_scene_is_not_found() {
        let (service, _) = service();
        assert_matches!(
            service.update_scene("5", input("X", "x", "x", "x")).await,
            Err(CoreError::SceneNotFound { id: 5 })
        );
    }

    #[tokio::test]
    async fn deleted_scene_is_unreachable() {
        let (service, _) = service();
        let keep = service.create_scene(input("Keep", "a", "b", "c")).await.unwrap();
        let gone = service.create_scene(input("Gone", "a", "b", "c")).await.unwrap();

        service.delete_scene(&gone.id.to_string()).await.unwrap();

        assert_matches!(
            service.get_scene(&gone.id.to_string()).await,
            Err(CoreError::SceneNotFound { .. })
        );
        assert_matches!(
            service.delete_scene(&gone.id.to_string()).await,
            Err(CoreError::SceneNotFound { .. })
        );
        assert_eq!(service.list_scenes().await.unwrap(), vec![keep]);
    }
}
