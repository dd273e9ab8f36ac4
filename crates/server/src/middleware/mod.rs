//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, added in `main`)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (add unique ID to each request, recorded in the span)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
