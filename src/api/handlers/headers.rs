//! Handler for the security headers scan endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::HeaderMap};

use super::{log_scan_failed, log_scan_started, read_target};
use crate::api::dto::scan::ScanRequest;
use crate::domain::entities::{ScanKind, HeadersScan};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_token;

/// Grades the target's response headers against a security checklist.
///
/// # Endpoint
///
/// `POST /api/scan/headers`
///
/// # Errors
///
/// - **400 Bad Request**: missing or invalid `url`
/// - **429 Too Many Requests**: per-client quota exhausted
/// - **502 Bad Gateway**: target unreachable or too slow
pub async fn headers_scan_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ScanRequest>, JsonRejection>,
) -> Result<Json<HeadersScan>, AppError> {
    let client = client_token(&headers);
    let target = read_target(payload, &client)?;
    log_scan_started(ScanKind::Headers, &target, &client);

    state
        .headers_service
        .scan(&target)
        .await
        .map(Json)
        .inspect_err(|e| log_scan_failed(ScanKind::Headers, &target, &client, e))
}
