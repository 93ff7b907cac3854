#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use microgreens_api::config::{GardenSettings, ServerConfig};
use microgreens_api::engine::GardenEngine;
use microgreens_api::router::build_app_router;
use microgreens_api::state::AppState;
use microgreens_events::EventBus;
use microgreens_store::{GardenStore, MemoryStore};
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        data_path: "unused.json".to_string(),
        notify_webhooks: Vec::new(),
        garden: GardenSettings::default(),
    }
}

/// A running app over an in-memory store.
pub struct TestApp {
    pub router: Router,
    pub engine: Arc<GardenEngine>,
    pub backend: Arc<MemoryStore>,
}

/// Build the full application router (same middleware stack as `main.rs`)
/// over a freshly seeded in-memory garden.
pub async fn build_test_app() -> TestApp {
    let backend = Arc::new(MemoryStore::new());
    let event_bus = Arc::new(EventBus::default());
    let engine = Arc::new(
        GardenEngine::start(GardenStore::new(backend.clone()), Arc::clone(&event_bus))
            .await
            .unwrap(),
    );
    let config = test_config();

    let state = AppState {
        engine: Arc::clone(&engine),
        config: Arc::new(config.clone()),
        event_bus,
    };

    TestApp {
        router: build_app_router(state, &config),
        engine,
        backend,
    }
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}
