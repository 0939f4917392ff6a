//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. `TraceLayer` (request span with a `request_id` field)
//! 3. Request ID (fill the span field, echo the header)

pub mod request_id;
pub mod trace;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use trace::{RequestSpan, trace_layer};
