//! Restaurant Orders server library.
//!
//! This crate provides the HTTP service as a library, allowing the full router
//! to be built in tests against an in-memory store.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
