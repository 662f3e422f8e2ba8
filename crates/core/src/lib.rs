//! Domain layer for the tourist guide.
//!
//! Holds the scene model, validation rules, the [`store::SceneStore`] seam,
//! the [`service::SceneService`] and the presentation data binding used by
//! the gallery client. No database dependency lives here.

pub mod error;
pub mod guide;
pub mod language;
pub mod scene;
pub mod service;
pub mod store;
pub mod types;
pub mod validation;
