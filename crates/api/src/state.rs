use std::sync::Arc;

use tourguide_core::service::SceneService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Scene business rules over the injected store.
    pub scenes: SceneService,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
