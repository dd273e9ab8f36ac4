//! MongoDB persistence for the `order` collection.

use async_trait::async_trait;
use bson::doc;
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::Collection;
use serde::{Deserialize, Serialize};

use restaurant_orders_core::{LineItem, OrderId, PaymentMethod};

use super::{MongoStore, ORDERS_COLLECTION, OrderStore, RepositoryError};
use crate::models::{NewOrder, Order};

// =============================================================================
// Stored Document Type
// =============================================================================

/// Shape of a document in the `order` collection.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    order_items: Vec<LineItem>,
    total: f64,
    payment_method: PaymentMethod,
    #[serde(default)]
    recension: String,
    created_at: bson::DateTime,
}

impl OrderDocument {
    fn new(order: NewOrder, created_at: bson::DateTime) -> Self {
        Self {
            id: None,
            order_items: order.order_items,
            total: order.total,
            payment_method: order.payment_method,
            recension: order.recension,
            created_at,
        }
    }
}

impl TryFrom<OrderDocument> for Order {
    type Error = RepositoryError;

    fn try_from(doc: OrderDocument) -> Result<Self, Self::Error> {
        let id = doc
            .id
            .ok_or_else(|| RepositoryError::DataCorruption("order document without _id".into()))?;

        let millis = doc.created_at.timestamp_millis();
        let created_at = DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
            RepositoryError::DataCorruption(format!("createdAt out of range: {millis}"))
        })?;

        Ok(Self {
            id: OrderId::from(id),
            order_items: doc.order_items,
            total: doc.total,
            payment_method: doc.payment_method,
            recension: doc.recension,
            created_at,
        })
    }
}

impl MongoStore {
    fn orders(&self) -> Collection<OrderDocument> {
        self.database().collection(ORDERS_COLLECTION)
    }
}

#[async_trait]
impl OrderStore for MongoStore {
    async fn create_order(&self, order: NewOrder) -> Result<Order, RepositoryError> {
        let mut document = OrderDocument::new(order, bson::DateTime::now());

        let result = self.orders().insert_one(&document).await?;
        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            RepositoryError::DataCorruption(format!(
                "insert returned non-ObjectId _id: {}",
                result.inserted_id
            ))
        })?;

        document.id = Some(id);
        Order::try_from(document)
    }

    async fn list_orders(&self) -> Result<Vec<Order>, RepositoryError> {
        let documents: Vec<OrderDocument> =
            self.orders().find(doc! {}).await?.try_collect().await?;

        documents.into_iter().map(Order::try_from).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn new_order() -> NewOrder {
        NewOrder {
            order_items: vec![LineItem {
                product_id: "p1".to_string(),
                name: "Tea".to_string(),
                quantity: 2.0,
                price: 3.0,
            }],
            total: 6.0,
            payment_method: PaymentMethod::Cash,
            recension: String::new(),
        }
    }

    #[test]
    fn test_document_field_names() {
        let document =
            bson::serialize_to_document(&OrderDocument::new(new_order(), bson::DateTime::now()))
                .unwrap();
        assert!(!document.contains_key("_id"));
        assert!(document.contains_key("orderItems"));
        assert_eq!(document.get_str("paymentMethod").unwrap(), "cash");
        assert_eq!(document.get_str("recension").unwrap(), "");
        assert!(document.get_datetime("createdAt").is_ok());
    }

    #[test]
    fn test_document_to_order() {
        let oid = ObjectId::new();
        let mut document = OrderDocument::new(new_order(), bson::DateTime::from_millis(0));
        document.id = Some(oid);

        let order = Order::try_from(document).unwrap();
        assert_eq!(order.id.as_str(), oid.to_hex());
        assert_eq!(order.created_at.timestamp(), 0);
        assert!((order.total - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_integer_quantities_are_read_as_numbers() {
        let stored = doc! {
            "_id": ObjectId::new(),
            "orderItems": [{ "productId": "p1", "name": "Tea", "quantity": 2_i32, "price": 3_i32 }],
            "total": 6_i32,
            "paymentMethod": "card",
            "createdAt": bson::DateTime::now(),
        };
        let document: OrderDocument = bson::deserialize_from_document(stored).unwrap();
        let order = Order::try_from(document).unwrap();
        assert_eq!(order.payment_method, PaymentMethod::Card);
        assert_eq!(order.recension, "");
    }
}
