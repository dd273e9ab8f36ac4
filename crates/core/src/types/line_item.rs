//! Order line items and total computation.

use serde::{Deserialize, Serialize};

/// One entry in an order's item sequence.
///
/// `productId` and `name` are display data and default to empty strings when
/// omitted; `quantity` and `price` are required numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product identity as known by the front end.
    #[serde(default)]
    pub product_id: String,
    /// Display name of the product.
    #[serde(default)]
    pub name: String,
    /// Number of units ordered.
    pub quantity: f64,
    /// Unit price.
    pub price: f64,
}

impl LineItem {
    /// `price * quantity` for this line.
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.price * self.quantity
    }
}

/// Sum of `price * quantity` over all items.
///
/// An empty slice totals `0.0`. The result is not guaranteed to be finite:
/// very large prices or quantities overflow to infinity and callers must
/// check before persisting.
#[must_use]
pub fn order_total(items: &[LineItem]) -> f64 {
    items.iter().map(LineItem::subtotal).sum()
}
