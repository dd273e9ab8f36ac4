//! Restaurant Orders Core - Shared domain types.
//!
//! This crate provides the types shared by the HTTP server and its tests:
//! - `server` - REST API over users and restaurant orders
//! - `integration-tests` - Black-box tests against a running server
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype ids, payment methods, line items and order totals

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
