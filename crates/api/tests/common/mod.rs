//! Shared harness for API integration tests.
//!
//! Builds the production router over an in-memory store and provides
//! one-shot request helpers.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use tourguide_api::config::ServerConfig;
use tourguide_api::router::build_app_router;
use tourguide_api::state::AppState;
use tourguide_core::error::CoreError;
use tourguide_core::scene::{NewScene, Scene};
use tourguide_core::service::SceneService;
use tourguide_core::store::memory::MemorySceneStore;
use tourguide_core::store::SceneStore;
use tourguide_core::types::DbId;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
    }
}

/// Build the full application router over the given store.
pub fn build_test_app(store: Arc<dyn SceneStore>) -> Router {
    let config = test_config();
    let state = AppState {
        scenes: SceneService::new(store),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Store spy
// ---------------------------------------------------------------------------

/// Wraps a [`MemorySceneStore`] and counts every call that reaches it.
#[derive(Default)]
pub struct SpyStore {
    inner: MemorySceneStore,
    calls: AtomicUsize,
}

impl SpyStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl SceneStore for SpyStore {
    async fn insert(&self, scene: &NewScene) -> Result<Scene, CoreError> {
        self.record();
        self.inner.insert(scene).await
    }

    async fn update(&self, id: DbId, scene: &NewScene) -> Result<Option<Scene>, CoreError> {
        self.record();
        self.inner.update(id, scene).await
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        self.record();
        self.inner.delete(id).await
    }

    async fn list_all(&self) -> Result<Vec<Scene>, CoreError> {
        self.record();
        self.inner.list_all().await
    }

    async fn get_by_id(&self, id: DbId) -> Result<Option<Scene>, CoreError> {
        self.record();
        self.inner.get_by_id(id).await
    }
}

/// A store whose every operation fails as if the database were down.
pub struct UnavailableStore;

#[async_trait]
impl SceneStore for UnavailableStore {
    async fn insert(&self, _scene: &NewScene) -> Result<Scene, CoreError> {
        Err(unavailable())
    }

    async fn update(&self, _id: DbId, _scene: &NewScene) -> Result<Option<Scene>, CoreError> {
        Err(unavailable())
    }

    async fn delete(&self, _id: DbId) -> Result<bool, CoreError> {
        Err(unavailable())
    }

    async fn list_all(&self) -> Result<Vec<Scene>, CoreError> {
        Err(unavailable())
    }

    async fn get_by_id(&self, _id: DbId) -> Result<Option<Scene>, CoreError> {
        Err(unavailable())
    }

    async fn health_check(&self) -> Result<(), CoreError> {
        Err(unavailable())
    }
}

fn unavailable() -> CoreError {
    CoreError::StoreUnavailable("pool timed out while waiting for an open connection".into())
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, Method::PUT, uri, body).await
}

async fn json_request(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
