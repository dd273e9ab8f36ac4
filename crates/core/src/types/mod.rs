//! Core types for restaurant orders.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod line_item;
pub mod payment;

pub use id::*;
pub use line_item::{LineItem, order_total};
pub use payment::{PaymentMethod, PaymentMethodError};
