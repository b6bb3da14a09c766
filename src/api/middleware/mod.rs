//! HTTP middleware for request processing.
//!
//! Provides observability, CORS and security header layers.

pub mod cors;
pub mod security_headers;
pub mod tracing;
