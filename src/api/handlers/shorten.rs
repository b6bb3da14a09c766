//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, Uri},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_origin::request_origin;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/a/b?c=1" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "shortUrl": "http://localhost:3000/Xy3_k9-A",
///   "originalUrl": "https://example.com/a/b?c=1",
///   "shortId": "Xy3_k9-A",
///   "expiresAt": "2026-11-13T12:00:00Z"
/// }
/// ```
///
/// The short URL base is `PUBLIC_BASE_URL` when configured, otherwise the
/// origin the request was sent to.
///
/// # Errors
///
/// - 400 if the body is not JSON, `url` is missing, or `url` is invalid
/// - 500 if the storage backend fails
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::invalid_input(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    })?;

    payload.validate()?;
    let long_url = payload
        .url
        .ok_or_else(|| AppError::invalid_input("Invalid URL", json!({ "fields": ["url"] })))?;

    let base = match &state.public_base_url {
        Some(base) => base.clone(),
        None => request_origin(&headers, &uri, state.behind_proxy)?,
    };

    let link = state.link_service.create(&long_url).await?;
    let short_url = state.link_service.short_url(&base, &link.code);

    Ok(Json(ShortenResponse {
        short_url,
        original_url: link.long_url,
        short_id: link.code,
        expires_at: link.expires_at,
    }))
}
