//! Application layer services implementing business logic.
//!
//! Services consume the domain storage trait and provide a clean API for
//! HTTP handlers and the admin CLI.
//!
//! - [`services::link_service::LinkService`] - Short link creation and resolution

pub mod services;
