//! Persistence for users and orders.
//!
//! # Database: `RestaurantOrder` (MongoDB)
//!
//! ## Collections
//!
//! - `users` - Users (`name`, `email`, both optional free text)
//! - `order` - Orders (line items, total, payment method, recension, `createdAt`)
//!
//! Handlers never talk to MongoDB directly. They go through the [`Store`]
//! trait held in [`crate::state::AppState`], which is implemented by
//! [`MongoStore`] in production and [`MemoryStore`] in tests.

pub mod memory;
pub mod orders;
pub mod users;

use async_trait::async_trait;
use mongodb::{Client, Database};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use restaurant_orders_core::{IdError, UserId};

use crate::models::{NewOrder, Order, User, UserInput};

pub use memory::MemoryStore;

/// Collection holding users.
pub const USERS_COLLECTION: &str = "users";

/// Collection holding orders. Singular for compatibility with existing data.
pub const ORDERS_COLLECTION: &str = "order";

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Error reported by the MongoDB driver.
    #[error("{0}")]
    Database(#[from] mongodb::error::Error),

    /// The id in the request is not a valid document id.
    #[error("invalid id: {0}")]
    InvalidId(#[from] IdError),

    /// A stored document could not be mapped to a domain type.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// The store cannot serve requests.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// User persistence operations.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user and return it with its generated id.
    async fn create_user(&self, input: UserInput) -> Result<User, RepositoryError>;

    /// All users in the store's natural order.
    async fn list_users(&self) -> Result<Vec<User>, RepositoryError>;

    /// Look up a user by id.
    async fn get_user(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;

    /// Replace `name` and `email` of a user, returning the updated record.
    ///
    /// Returns `None` if no user has this id.
    async fn update_user(
        &self,
        id: &UserId,
        input: UserInput,
    ) -> Result<Option<User>, RepositoryError>;

    /// Delete a user. Returns `false` if no user had this id.
    async fn delete_user(&self, id: &UserId) -> Result<bool, RepositoryError>;
}

/// Order persistence operations.
///
/// Orders are insert-only.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Insert a validated order, stamping `createdAt` with the current time.
    async fn create_order(&self, order: NewOrder) -> Result<Order, RepositoryError>;

    /// All orders in the store's natural order.
    async fn list_orders(&self) -> Result<Vec<Order>, RepositoryError>;
}

/// A complete backing store for the service.
#[async_trait]
pub trait Store: UserStore + OrderStore {
    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// MongoDB-backed store.
///
/// Cheap to clone; the driver's `Database` handle shares one connection pool.
#[derive(Clone, Debug)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Wrap an existing database handle.
    #[must_use]
    pub const fn new(database: Database) -> Self {
        Self { database }
    }

    /// Get the underlying database handle.
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.database
    }
}

#[async_trait]
impl Store for MongoStore {
    async fn ping(&self) -> Result<(), RepositoryError> {
        self.database
            .run_command(bson::doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(RepositoryError::from)
    }
}

/// Create a MongoDB store for the given database.
///
/// The driver connects lazily, so this only fails on an unparseable URI or
/// an SRV lookup failure. Use [`Store::ping`] to check reachability.
///
/// # Arguments
///
/// * `uri` - MongoDB connection string (wrapped in `SecretString`)
/// * `database` - Database name
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the client cannot be created.
pub async fn connect(uri: &SecretString, database: &str) -> Result<MongoStore, RepositoryError> {
    let client = Client::with_uri_str(uri.expose_secret()).await?;
    Ok(MongoStore::new(client.database(database)))
}
