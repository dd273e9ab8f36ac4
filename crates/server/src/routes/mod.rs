//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                 - Front-end page (static/index.html)
//! GET    /health           - Liveness check
//! GET    /health/ready     - Readiness check (pings the store)
//!
//! # Users
//! POST   /users            - Create user (JSON or form, HTML response)
//! GET    /users            - List users
//! GET    /users/{id}       - Get user
//! PUT    /users/{id}       - Replace name/email
//! DELETE /users/{id}       - Delete user
//!
//! # Orders (insert-only)
//! POST   /orders           - Create order
//! GET    /orders           - List orders
//! ```
//!
//! Any other path is served from the static directory.

pub mod extract;
pub mod health;
pub mod orders;
pub mod users;

use axum::{
    Router,
    extract::Request,
    middleware,
    routing::{get, post},
};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(users::create).get(users::index))
        .route(
            "/{id}",
            get(users::show).put(users::update).delete(users::destroy),
        )
}

/// Create the order routes router.
///
/// Orders have no update or delete routes.
pub fn order_routes() -> Router<AppState> {
    Router::new().route("/", post(orders::create).get(orders::index))
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/users", user_routes())
        .nest("/orders", order_routes())
}

/// Build the complete application: API routes, static assets and the
/// request-id and tracing middleware.
pub fn app(state: AppState) -> Router {
    let static_dir = state.config().static_dir.clone();

    Router::new()
        .merge(routes())
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .fallback_service(ServeDir::new(static_dir))
        // Request ID runs inside the trace span so it can record into it
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = tracing::field::Empty,
            )
        }))
        .with_state(state)
}
