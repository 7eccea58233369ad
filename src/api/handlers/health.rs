//! Handler for health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::domain::entities::ScanKind;
use crate::state::AppState;

/// Returns service health status.
///
/// # Endpoint
///
/// `GET /health`
///
/// Reports how many clients the rate limit stores currently hold.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "rate_limiter": {
///       "status": "ok",
///       "message": "Tracking 3 clients"
///     }
///   }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let tracked: usize = ScanKind::ALL
        .iter()
        .map(|kind| state.limiters.get(*kind).tracked_clients())
        .sum();

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            rate_limiter: CheckStatus {
                status: "ok".to_string(),
                message: Some(format!("Tracking {} clients", tracked)),
            },
        },
    })
}
