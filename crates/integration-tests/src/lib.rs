//! End-to-end tests for the restaurant orders server.
//!
//! These tests talk to a live server over HTTP, so they need:
//! - A reachable MongoDB instance
//! - The server running (`cargo run -p restaurant-orders-server`)
//!
//! Every test is `#[ignore]`d by default. Run them with:
//!
//! ```bash
//! cargo test -p restaurant-orders-integration-tests -- --ignored
//! ```
//!
//! Set `RESTAURANT_BASE_URL` to target a server other than
//! `http://localhost:3000`.

use reqwest::Client;
use restaurant_orders_core::{LineItem, OrderId, PaymentMethod, UserId};
use serde::Deserialize;

/// Default address of a locally running server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Base URL of the server under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("RESTAURANT_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}

/// HTTP client plus the server address.
#[derive(Debug, Clone)]
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// Build a context pointed at [`base_url`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: base_url(),
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// User as returned by the JSON routes.
#[derive(Debug, Clone, Deserialize)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: UserId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Order as returned by the JSON routes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    #[serde(rename = "_id")]
    pub id: OrderId,
    pub order_items: Vec<LineItem>,
    pub total: f64,
    pub payment_method: PaymentMethod,
    pub recension: String,
    pub created_at: String,
}

/// Body of a 4xx JSON response.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Unique suffix for test records, so parallel runs don't collide.
#[must_use]
pub fn unique_suffix() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos());
    format!("{nanos:x}")
}
