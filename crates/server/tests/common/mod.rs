//! Shared helpers for the in-process router tests.

#![allow(dead_code, clippy::unwrap_used)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header::CONTENT_TYPE},
};
use http_body_util::BodyExt;
use restaurant_orders_server::{
    config::ServerConfig, db::memory::MemoryStore, routes, state::AppState,
};
use secrecy::SecretString;
use tower::ServiceExt;

pub fn test_config() -> ServerConfig {
    ServerConfig {
        mongodb_uri: SecretString::from("mongodb://localhost:27017"),
        database: "RestaurantOrderTest".to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        static_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/static")),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// Build the full application over `store`.
pub fn build_app(store: Arc<MemoryStore>) -> Router {
    routes::app(AppState::new(test_config(), store))
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a user through the API and return its `_id`.
pub async fn create_user(app: &Router, name: &str, email: &str) -> String {
    let response = send(
        app,
        json_request(
            "POST",
            "/users",
            &serde_json::json!({ "name": name, "email": email }),
        ),
    )
    .await;
    assert_eq!(response.status(), 201);

    let users = body_json(send(app, empty_request("GET", "/users")).await).await;
    users
        .as_array()
        .unwrap()
        .iter()
        .rev()
        .find(|u| u["name"] == name)
        .and_then(|u| u["_id"].as_str())
        .unwrap()
        .to_string()
}
