//! Order domain types and creation-time validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use restaurant_orders_core::{LineItem, OrderId, PaymentMethod, order_total};

/// A stored restaurant order.
///
/// Orders are immutable once created; `total` is the value computed at
/// creation time and is never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Store-generated id, exposed as `_id`.
    #[serde(rename = "_id")]
    pub id: OrderId,
    /// Line items in the order they were submitted.
    pub order_items: Vec<LineItem>,
    /// Sum of `price * quantity` over `order_items`.
    pub total: f64,
    /// How the customer pays.
    pub payment_method: PaymentMethod,
    /// Free-text customer review, empty when none was given.
    pub recension: String,
    /// When the order was stored.
    pub created_at: DateTime<Utc>,
}

/// Client payload for `POST /orders`.
///
/// `order` and `payment` are kept as raw JSON so that a missing or mistyped
/// value is reported by [`CreateOrderRequest::validate`] with a specific
/// message rather than a generic deserialization error. Client-supplied
/// totals are not part of the shape and are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub order: Option<Value>,
    #[serde(default)]
    pub payment: Option<Value>,
    #[serde(default)]
    pub recension: Option<String>,
}

/// A validated order ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub order_items: Vec<LineItem>,
    pub total: f64,
    pub payment_method: PaymentMethod,
    pub recension: String,
}

/// Reasons an order payload is rejected.
///
/// The display strings are returned verbatim to clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderValidationError {
    #[error("Order items are required.")]
    MissingItems,

    #[error("Valid total is required.")]
    InvalidTotal,

    #[error("Payment method must be either cash or card.")]
    InvalidPaymentMethod,
}

impl CreateOrderRequest {
    /// Validate the payload and compute the order total.
    ///
    /// Checks run in a fixed order and the first failure wins:
    /// 1. `order` is a non-empty array
    /// 2. every item has numeric `price` and `quantity` and the computed total
    ///    is a finite number
    /// 3. `payment` is exactly `"cash"` or `"card"`
    ///
    /// # Errors
    ///
    /// Returns the [`OrderValidationError`] for the first failing check.
    pub fn validate(self) -> Result<NewOrder, OrderValidationError> {
        let items = match self.order {
            Some(Value::Array(items)) if !items.is_empty() => items,
            _ => return Err(OrderValidationError::MissingItems),
        };

        // An item without a usable price or quantity has no total.
        let order_items = items
            .into_iter()
            .map(serde_json::from_value::<LineItem>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| OrderValidationError::InvalidTotal)?;

        let total = order_total(&order_items);
        if !total.is_finite() {
            return Err(OrderValidationError::InvalidTotal);
        }

        let payment_method = self
            .payment
            .as_ref()
            .and_then(Value::as_str)
            .and_then(|p| p.parse::<PaymentMethod>().ok())
            .ok_or(OrderValidationError::InvalidPaymentMethod)?;

        Ok(NewOrder {
            order_items,
            total,
            payment_method,
            recension: self.recension.unwrap_or_default(),
        })
    }
}
