//! Core domain entities.
//!
//! - [`Link`] - An association between a short code and an original URL

pub mod link;

pub use link::Link;
