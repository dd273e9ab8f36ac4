//! Order route handlers.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::models::{CreateOrderRequest, Order};
use crate::state::AppState;

/// Create an order.
///
/// POST /orders
///
/// The total is computed from the submitted line items. Validation failures
/// answer 400 before anything is written.
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>)> {
    let Json(request) = payload.inspect_err(|e| {
        tracing::warn!(error = %e, "Rejected malformed order payload");
    })?;

    tracing::debug!(
        items = request
            .order
            .as_ref()
            .and_then(serde_json::Value::as_array)
            .map_or(0, Vec::len),
        payment = request
            .payment
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default(),
        "Received order"
    );

    let new_order = request.validate().inspect_err(|e| {
        tracing::warn!(reason = %e, "Order validation failed");
    })?;

    add_breadcrumb(
        "orders",
        "Order validated",
        Some(&[("payment_method", new_order.payment_method.as_str())]),
    );

    let order = state.store().create_order(new_order).await?;
    tracing::info!(order_id = %order.id, total = order.total, "Order saved");

    Ok((StatusCode::CREATED, Json(order)))
}

/// List all orders.
///
/// GET /orders
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Order>>> {
    let orders = state.store().list_orders().await?;
    Ok(Json(orders))
}
