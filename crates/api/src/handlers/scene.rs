//! Handlers for the `/scenes` resource.
//!
//! Path ids arrive as raw strings so that malformed ids are reported by
//! the scene service with the same error body as every other input error.
//! Extractor rejections are taken as `Result`s and mapped by [`AppError`]
//! so they never fall through to axum's plain-text responses.
//!
//! [`AppError`]: crate::error::AppError

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tourguide_core::scene::{Scene, SceneInput};

use crate::error::AppResult;
use crate::state::AppState;

/// Query parameters for the explanation endpoint (`?lang=`).
#[derive(Debug, Deserialize)]
pub struct ExplanationParams {
    pub lang: Option<String>,
}

/// GET /api/scenes
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Scene>>> {
    let scenes = state.scenes.list_scenes().await?;
    Ok(Json(scenes))
}

/// GET /api/scenes/{id}?lang=ja|en|zh
///
/// Responds with the explanation as a bare JSON string.
pub async fn get_explanation(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    params: Result<Query<ExplanationParams>, QueryRejection>,
) -> AppResult<Json<String>> {
    let Path(id) = id?;
    let Query(params) = params?;
    tracing::debug!(scene_id = %id, lang = ?params.lang, "Fetching scene explanation");
    let explanation = state
        .scenes
        .resolve_explanation(&id, params.lang.as_deref())
        .await?;
    Ok(Json(explanation))
}

/// POST /api/scenes
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<SceneInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Scene>)> {
    let Json(input) = payload?;
    let scene = state.scenes.create_scene(input).await?;
    Ok((StatusCode::CREATED, Json(scene)))
}

/// PUT /api/scenes/{id}
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<SceneInput>, JsonRejection>,
) -> AppResult<Json<Scene>> {
    let Path(id) = id?;
    let Json(input) = payload?;
    let scene = state.scenes.update_scene(&id, input).await?;
    Ok(Json(scene))
}

/// DELETE /api/scenes/{id}
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = id?;
    state.scenes.delete_scene(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
