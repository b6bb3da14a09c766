//! DTOs for the link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a URL.
///
/// `url` is optional at the type level so a missing field surfaces as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(required(message = "url is required"))]
    pub url: Option<String>,
}

/// Response for a newly created short link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_url: String,
    pub original_url: String,
    pub short_id: String,
    pub expires_at: DateTime<Utc>,
}
