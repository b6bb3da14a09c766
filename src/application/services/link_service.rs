//! Link creation and resolution service.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::Link;
use crate::domain::repositories::LinkStore;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, is_well_formed_code};
use crate::utils::url_validator::is_valid_url;

/// Default lifetime of a link: 30 days.
pub const DEFAULT_TTL_SECONDS: u64 = 86_400 * 30;

/// Candidate codes tried before giving up on a create.
pub const MAX_ATTEMPTS: usize = 5;

/// Service for creating and resolving short links.
///
/// Owns the storage backend chosen at startup. Creation validates the URL,
/// then claims a fresh random code with an atomic insert-if-absent, retrying
/// on collision up to [`MAX_ATTEMPTS`] times.
pub struct LinkService {
    store: Arc<dyn LinkStore>,
    ttl_seconds: u64,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(store: Arc<dyn LinkStore>, ttl_seconds: u64) -> Self {
        Self { store, ttl_seconds }
    }

    /// Backend name, e.g. `"memory"` or `"redis"`.
    pub fn store_kind(&self) -> &'static str {
        self.store.kind()
    }

    /// Checks if the storage backend is reachable.
    pub async fn store_healthy(&self) -> bool {
        self.store.health_check().await
    }

    /// Creates a short link for `long_url`.
    ///
    /// The URL is stored exactly as given. Submitting the same URL twice
    /// yields two independent links.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidInput`] if the URL is not an absolute network URL;
    ///   nothing is stored
    /// - [`AppError::BackendUnavailable`] if the store fails
    /// - [`AppError::GenerationExhausted`] if every candidate code was taken
    /// - [`AppError::Internal`] if the random source fails
    pub async fn create(&self, long_url: &str) -> Result<Link, AppError> {
        if !is_valid_url(long_url) {
            return Err(AppError::invalid_input(
                "Invalid URL",
                json!({ "url": long_url }),
            ));
        }

        for attempt in 1..=MAX_ATTEMPTS {
            let code = generate_code()?;

            if self
                .store
                .put_if_absent(&code, long_url, self.ttl_seconds)
                .await?
            {
                metrics::counter!("links_created_total").increment(1);
                info!("Created short link {} -> {}", code, long_url);
                return Ok(Link::new(code, long_url.to_owned(), self.ttl_seconds));
            }

            metrics::counter!("link_collisions_total").increment(1);
            warn!("Short code collision on attempt {}: {}", attempt, code);
        }

        Err(AppError::generation_exhausted(
            "Failed to generate unique code",
            json!({ "attempts": MAX_ATTEMPTS }),
        ))
    }

    /// Resolves a short code to its original URL.
    ///
    /// Codes that cannot have been generated are rejected without a backend
    /// round trip. The stored URL is returned as-is.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the code is unknown or expired
    /// - [`AppError::BackendUnavailable`] if the store fails
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        let found = if is_well_formed_code(code) {
            self.store.get(code).await?
        } else {
            debug!("Rejecting malformed code without lookup: {}", code);
            None
        };

        match found {
            Some(url) => {
                metrics::counter!("redirects_total", "outcome" => "hit").increment(1);
                Ok(url)
            }
            None => {
                metrics::counter!("redirects_total", "outcome" => "miss").increment(1);
                Err(AppError::not_found(
                    "Short URL not found",
                    json!({ "code": code }),
                ))
            }
        }
    }

    /// Constructs the full short URL from a base and a code.
    pub fn short_url(&self, base: &str, code: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), code)
    }
}
