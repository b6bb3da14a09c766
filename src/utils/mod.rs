//! Utility functions for code generation, URL validation, and request handling.
//!
//! - [`code_generator`] - Random short code generation
//! - [`url_validator`] - Acceptance check for submitted URLs
//! - [`request_origin`] - Public origin derived from request headers

pub mod code_generator;
pub mod request_origin;
pub mod url_validator;
