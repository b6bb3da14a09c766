//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Returns `307 Temporary Redirect` with the stored URL in `Location`.
///
/// # Errors
///
/// - 404 if the code is unknown or expired
/// - 500 if the storage backend fails
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let long_url = state.link_service.resolve(&code).await?;
    debug!("Redirecting {} -> {}", code, long_url);

    let location = location_header(&long_url)?;

    Ok((StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]).into_response())
}

/// Converts a stored URL into a `Location` header value.
///
/// URLs are stored as submitted, which may include non-ASCII characters
/// that are not valid in a header. Those are sent in their percent-encoded
/// serialized form instead.
fn location_header(long_url: &str) -> Result<HeaderValue, AppError> {
    if let Ok(value) = HeaderValue::from_str(long_url) {
        return Ok(value);
    }

    Url::parse(long_url)
        .ok()
        .and_then(|url| HeaderValue::from_str(url.as_str()).ok())
        .ok_or_else(|| {
            AppError::internal(
                "Stored URL cannot be used as a redirect target",
                json!({ "url": long_url }),
            )
        })
}
