//! Handler for health check endpoint.

use axum::{Json, extract::State};
use chrono::Utc;

use crate::api::dto::health::HealthResponse;
use crate::state::AppState;

/// Liveness probe.
///
/// # Endpoint
///
/// `GET /health`
///
/// Always answers `200 OK` while the process is serving. The storage
/// backend is reported by name but not contacted.
///
/// # Response
///
/// ```json
/// {
///   "status": "OK",
///   "timestamp": "2026-10-14T12:00:00Z",
///   "version": "0.1.0",
///   "storage": "redis"
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION"),
        storage: state.link_service.store_kind(),
    })
}
