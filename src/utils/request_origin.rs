//! Origin extraction from HTTP request headers.

use axum::http::{HeaderMap, Uri, header};
use serde_json::json;

use crate::AppError;

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Builds the `scheme://host[:port]` origin a client used to reach the service.
///
/// The host (port included) comes from the `Host` header, or from the
/// request target's authority when there is none (HTTP/2). The scheme is
/// `http` unless `trust_forwarded` is set and the request carries an
/// `X-Forwarded-Proto` of `http` or `https`.
///
/// # Errors
///
/// Returns [`AppError::InvalidInput`] if:
/// - Neither a `Host` header nor a URI authority is present
/// - The header value contains invalid UTF-8
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "s.example.com:8080".parse().unwrap());
///
/// let origin = request_origin(&headers, &Uri::from_static("/shorten"), false).unwrap();
/// assert_eq!(origin, "http://s.example.com:8080");
/// ```
pub fn request_origin(
    headers: &HeaderMap,
    uri: &Uri,
    trust_forwarded: bool,
) -> Result<String, AppError> {
    let host = match headers.get(header::HOST) {
        Some(value) => value
            .to_str()
            .map_err(|_| AppError::invalid_input("Invalid Host header", json!({})))?
            .trim(),
        None => uri.authority().map(|a| a.as_str()).unwrap_or_default(),
    };

    if host.is_empty() {
        return Err(AppError::invalid_input("Missing Host header", json!({})));
    }

    let scheme = if trust_forwarded {
        headers
            .get(FORWARDED_PROTO)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_ascii_lowercase())
            .filter(|v| v == "http" || v == "https")
            .unwrap_or_else(|| "http".to_string())
    } else {
        "http".to_string()
    };

    Ok(format!("{}://{}", scheme, host))
}
