//! Domain models for users and orders.
//!
//! These are the shapes handlers work with and serialize to clients. They are
//! separate from the stored document types in [`crate::db`], which own the
//! `ObjectId`/`DateTime` representation used by MongoDB.

pub mod order;
pub mod user;

pub use order::{CreateOrderRequest, NewOrder, Order, OrderValidationError};
pub use user::{User, UserInput};
