pub mod health;
pub mod scene;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /scenes                                          list, create
/// /scenes/{id}                                     explanation (?lang=), update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/scenes", scene::router())
}
