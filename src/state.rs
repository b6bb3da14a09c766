//! Shared application state injected into request handlers.

use std::sync::Arc;

use crate::application::services::LinkService;

/// Process-scoped state built once at startup.
///
/// Cloning is cheap: the link service (and the store it owns) is shared.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    /// Base for generated short URLs; `None` derives it from the request.
    pub public_base_url: Option<String>,
    /// Whether `X-Forwarded-Proto` is trusted when deriving the base.
    pub behind_proxy: bool,
}

impl AppState {
    pub fn new(link_service: Arc<LinkService>) -> Self {
        Self {
            link_service,
            public_base_url: None,
            behind_proxy: false,
        }
    }

    pub fn with_public_base_url(mut self, base: Option<String>) -> Self {
        self.public_base_url = base;
        self
    }

    pub fn with_behind_proxy(mut self, behind_proxy: bool) -> Self {
        self.behind_proxy = behind_proxy;
        self
    }
}
