//! Scene model: a tourist spot with a name, an image and one explanation
//! per supported language.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::language::Language;
use crate::types::DbId;

/// Per-language explanation text, keyed by [`Language`].
///
/// Serializes as a plain JSON object (`{"ja": "...", "en": "...", "zh": "..."}`),
/// which is also the shape stored in the `explanations` JSONB column.
/// Deserialization drops keys outside the supported languages so that one
/// stray entry in a stored row does not make the whole row unreadable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Explanations(BTreeMap<Language, String>);

impl<'de> Deserialize<'de> for Explanations {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, String>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .filter_map(|(code, text)| match code.parse::<Language>() {
                Ok(language) => Some((language, text)),
                Err(_) => {
                    tracing::warn!(
                        language = %code,
                        "Ignoring explanation in unsupported language"
                    );
                    None
                }
            })
            .collect())
    }
}

impl Explanations {
    /// Build a complete explanation map.
    pub fn new(ja: impl Into<String>, en: impl Into<String>, zh: impl Into<String>) -> Self {
        Self(BTreeMap::from([
            (Language::Ja, ja.into()),
            (Language::En, en.into()),
            (Language::Zh, zh.into()),
        ]))
    }

    pub fn get(&self, language: Language) -> Option<&str> {
        self.0.get(&language).map(String::as_str)
    }

    /// Whether `language` has non-blank text.
    pub fn has_text(&self, language: Language) -> bool {
        self.text(language).is_some()
    }

    /// Text for `language`, falling back to [`Language::DEFAULT`] when the
    /// translation is missing or blank. `None` only if both are.
    pub fn resolve(&self, language: Language) -> Option<&str> {
        self.text(language).or_else(|| self.text(Language::DEFAULT))
    }

    pub fn insert(&mut self, language: Language, text: impl Into<String>) {
        self.0.insert(language, text.into());
    }

    pub fn remove(&mut self, language: Language) -> Option<String> {
        self.0.remove(&language)
    }

    /// Whether all three languages carry text.
    pub fn is_complete(&self) -> bool {
        Language::ALL.iter().all(|lang| self.0.contains_key(lang))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Language, &str)> {
        self.0.iter().map(|(lang, text)| (*lang, text.as_str()))
    }

    fn text(&self, language: Language) -> Option<&str> {
        self.get(language).filter(|text| !text.trim().is_empty())
    }
}

impl FromIterator<(Language, String)> for Explanations {
    fn from_iter<I: IntoIterator<Item = (Language, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A stored scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub id: DbId,
    pub name: String,
    pub image_url: String,
    pub explanations: Explanations,
}

/// Validated mutable fields of a scene, used for both insert and full
/// replace. Produced by [`crate::validation::validate_scene_input`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScene {
    pub name: String,
    pub image_url: String,
    pub explanations: Explanations,
}

impl NewScene {
    /// Attach a store-assigned id.
    pub fn into_scene(self, id: DbId) -> Scene {
        Scene {
            id,
            name: self.name,
            image_url: self.image_url,
            explanations: self.explanations,
        }
    }
}

/// Raw request body for create and update.
///
/// Every field is optional so that missing fields are reported by
/// validation alongside the other offending fields instead of failing
/// deserialization on the first one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub explanations: Option<BTreeMap<String, String>>,
}
