//! In-process store for tests.
//!
//! Keeps users and orders in insertion order behind a `tokio` lock and mints
//! ids in the same format as MongoDB. A store built with
//! [`MemoryStore::unavailable`] fails every call, which lets tests exercise
//! the server-error paths without a broken database.

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::Utc;
use tokio::sync::RwLock;

use restaurant_orders_core::{OrderId, UserId};

use super::{OrderStore, RepositoryError, Store, UserStore};
use crate::models::{NewOrder, Order, User, UserInput};

/// In-memory implementation of [`Store`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    orders: RwLock<Vec<Order>>,
    failure: Option<String>,
}

impl MemoryStore {
    /// Create an empty, healthy store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose every operation fails with `message`.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Number of stored orders.
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }

    fn check(&self) -> Result<(), RepositoryError> {
        match &self.failure {
            Some(message) => Err(RepositoryError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, input: UserInput) -> Result<User, RepositoryError> {
        self.check()?;

        let user = User {
            id: UserId::from(ObjectId::new()),
            name: input.name,
            email: input.email,
        };
        self.users.write().await.push(user.clone());

        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, RepositoryError> {
        self.check()?;
        Ok(self.users.read().await.clone())
    }

    async fn get_user(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        self.check()?;
        Ok(self.users.read().await.iter().find(|u| &u.id == id).cloned())
    }

    async fn update_user(
        &self,
        id: &UserId,
        input: UserInput,
    ) -> Result<Option<User>, RepositoryError> {
        self.check()?;

        let mut users = self.users.write().await;
        let Some(user) = users.iter_mut().find(|u| &u.id == id) else {
            return Ok(None);
        };

        user.name = input.name;
        user.email = input.email;

        Ok(Some(user.clone()))
    }

    async fn delete_user(&self, id: &UserId) -> Result<bool, RepositoryError> {
        self.check()?;

        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| &u.id != id);

        Ok(users.len() < before)
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn create_order(&self, order: NewOrder) -> Result<Order, RepositoryError> {
        self.check()?;

        let order = Order {
            id: OrderId::from(ObjectId::new()),
            order_items: order.order_items,
            total: order.total,
            payment_method: order.payment_method,
            recension: order.recension,
            created_at: Utc::now(),
        };
        self.orders.write().await.push(order.clone());

        Ok(order)
    }

    async fn list_orders(&self) -> Result<Vec<Order>, RepositoryError> {
        self.check()?;
        Ok(self.orders.read().await.clone())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), RepositoryError> {
        self.check()
    }
}
