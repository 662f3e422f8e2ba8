use axum::routing::get;
use axum::Router;

use crate::handlers::scene;
use crate::state::AppState;

/// Routes mounted at `/scenes`.
///
/// ```text
/// GET    /                 list
/// POST   /                 create
/// GET    /{id}?lang=       get_explanation
/// PUT    /{id}             update
/// DELETE /{id}             delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(scene::list).post(scene::create))
        .route(
            "/{id}",
            get(scene::get_explanation)
                .put(scene::update)
                .delete(scene::delete),
        )
}
