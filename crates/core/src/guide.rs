//! Presentation data binding for the guide client.
//!
//! Pure state with no rendering: gallery ordering, the explanation panel
//! state machine, localized UI strings and admin form checks. The client
//! drives these from user events and HTTP results.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{CoreError, FieldError};
use crate::language::Language;
use crate::scene::{NewScene, Scene, SceneInput};
use crate::types::DbId;
use crate::validation::validate_scene_input;

// ---------------------------------------------------------------------------
// UI strings
// ---------------------------------------------------------------------------

/// Fixed UI labels shown around the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiText {
    MainMenu,
    Loading,
    Volume,
    Error,
    Retry,
}

/// Localized label for `key` in `language`.
pub fn ui_text(key: UiText, language: Language) -> &'static str {
    match (key, language) {
        (UiText::MainMenu, Language::Ja) => "メインメニュー",
        (UiText::MainMenu, Language::En) => "Main Menu",
        (UiText::MainMenu, Language::Zh) => "主菜单",
        (UiText::Loading, Language::Ja) => "読み込み中...",
        (UiText::Loading, Language::En) => "Loading...",
        (UiText::Loading, Language::Zh) => "加载中...",
        (UiText::Volume, Language::Ja | Language::Zh) => "音量",
        (UiText::Volume, Language::En) => "Volume",
        (UiText::Error, Language::Ja) => "エラーが発生しました",
        (UiText::Error, Language::En) => "An error occurred",
        (UiText::Error, Language::Zh) => "发生错误",
        (UiText::Retry, Language::Ja) => "再試行",
        (UiText::Retry, Language::En) => "Try Again",
        (UiText::Retry, Language::Zh) => "重试",
    }
}

// ---------------------------------------------------------------------------
// Gallery
// ---------------------------------------------------------------------------

/// One tile in the gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GallerySpot {
    /// 1-based position shown on the tile.
    pub number: usize,
    pub id: DbId,
    pub name: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gallery {
    pub spots: Vec<GallerySpot>,
}

impl Gallery {
    /// Build the gallery ordered by scene id, whatever order the scenes
    /// arrive in.
    pub fn from_scenes(scenes: &[Scene]) -> Self {
        let mut sorted: Vec<&Scene> = scenes.iter().collect();
        sorted.sort_by_key(|s| s.id);
        let spots = sorted
            .into_iter()
            .enumerate()
            .map(|(i, scene)| GallerySpot {
                number: i + 1,
                id: scene.id,
                name: scene.name.clone(),
                image_url: scene.image_url.clone(),
            })
            .collect();
        Self { spots }
    }

    pub fn find(&self, id: DbId) -> Option<&GallerySpot> {
        self.spots.iter().find(|s| s.id == id)
    }
}

// ---------------------------------------------------------------------------
// Explanation panel
// ---------------------------------------------------------------------------

/// Identifies one explanation fetch. Two requests with the same key may be
/// deduplicated by the client; running both is also fine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneRequestKey {
    pub id: DbId,
    pub language: Language,
}

impl SceneRequestKey {
    /// Request path for this key, e.g. `/api/scenes/3?lang=zh`.
    pub fn path(&self) -> String {
        format!("/api/scenes/{}?lang={}", self.id, self.language)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelState {
    Idle,
    Loading(SceneRequestKey),
    Loaded { key: SceneRequestKey, text: String },
    Failed { key: SceneRequestKey, message: String },
}

/// The detail panel under the gallery.
#[derive(Debug, Clone)]
pub struct ExplanationPanel {
    language: Language,
    selected: Option<DbId>,
    state: PanelState,
}

impl ExplanationPanel {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            selected: None,
            state: PanelState::Idle,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn selected(&self) -> Option<DbId> {
        self.selected
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    /// Select a spot. Returns the request the client must issue.
    pub fn select(&mut self, id: DbId) -> SceneRequestKey {
        self.selected = Some(id);
        self.start(id)
    }

    /// Switch language. Returns a new request when a spot is selected.
    pub fn set_language(&mut self, language: Language) -> Option<SceneRequestKey> {
        self.language = language;
        self.selected.map(|id| self.start(id))
    }

    /// Apply a successful response. Responses for a key that is no longer
    /// current are ignored; returns whether the state changed.
    pub fn resolve(&mut self, key: SceneRequestKey, text: impl Into<String>) -> bool {
        if !self.is_current(key) {
            return false;
        }
        self.state = PanelState::Loaded {
            key,
            text: text.into(),
        };
        true
    }

    /// Apply a failed response. Stale failures are ignored as in
    /// [`resolve`](Self::resolve).
    pub fn fail(&mut self, key: SceneRequestKey, message: impl Into<String>) -> bool {
        if !self.is_current(key) {
            return false;
        }
        self.state = PanelState::Failed {
            key,
            message: message.into(),
        };
        true
    }

    /// Manual retry after a failure. Never triggered automatically.
    pub fn retry(&mut self) -> Option<SceneRequestKey> {
        match self.state {
            PanelState::Failed { key, .. } => {
                self.state = PanelState::Loading(key);
                Some(key)
            }
            _ => None,
        }
    }

    /// Text to show in the panel for the current state.
    pub fn display_text(&self) -> &str {
        match &self.state {
            PanelState::Idle => "",
            PanelState::Loading(_) => ui_text(UiText::Loading, self.language),
            PanelState::Loaded { text, .. } => text.as_str(),
            PanelState::Failed { .. } => ui_text(UiText::Error, self.language),
        }
    }

    /// Label of the retry action, shown only after a failure.
    pub fn retry_label(&self) -> Option<&'static str> {
        matches!(self.state, PanelState::Failed { .. })
            .then(|| ui_text(UiText::Retry, self.language))
    }

    fn start(&mut self, id: DbId) -> SceneRequestKey {
        let key = SceneRequestKey {
            id,
            language: self.language,
        };
        self.state = PanelState::Loading(key);
        key
    }

    fn is_current(&self, key: SceneRequestKey) -> bool {
        matches!(self.state, PanelState::Loading(current) if current == key)
    }
}

// ---------------------------------------------------------------------------
// Admin form
// ---------------------------------------------------------------------------

static IMAGE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s/?#]+[^\s]*$").expect("valid regex"));

/// The admin create/edit form.
///
/// Applies the server rules plus an image URL format check the server
/// does not perform.
#[derive(Debug, Clone, Default)]
pub struct SceneForm {
    pub input: SceneInput,
}

impl SceneForm {
    /// Prefill the form from an existing scene for editing.
    pub fn from_scene(scene: &Scene) -> Self {
        Self {
            input: SceneInput {
                name: Some(scene.name.clone()),
                image_url: Some(scene.image_url.clone()),
                explanations: Some(
                    scene
                        .explanations
                        .iter()
                        .map(|(lang, text)| (lang.to_string(), text.to_string()))
                        .collect(),
                ),
            },
        }
    }

    pub fn validate(&self) -> Result<NewScene, CoreError> {
        let url_error = match self.input.image_url.as_deref() {
            Some(url) if !IMAGE_URL_RE.is_match(url) => Some(FieldError::new(
                "imageUrl",
                "must be an absolute http(s) URL",
            )),
            _ => None,
        };

        match (validate_scene_input(self.input.clone()), url_error) {
            (Ok(scene), None) => Ok(scene),
            (Ok(_), Some(url_error)) => Err(CoreError::Validation(vec![url_error])),
            (Err(CoreError::Validation(mut errors)), Some(url_error)) => {
                errors.push(url_error);
                Err(CoreError::Validation(errors))
            }
            (Err(err), _) => Err(err),
        }
    }
}
