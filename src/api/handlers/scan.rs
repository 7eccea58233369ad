//! Handler for the full scan endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::HeaderMap};

use super::read_target;
use crate::api::dto::scan::ScanRequest;
use crate::domain::entities::ScanReport;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_token;

/// Runs all four scans concurrently and returns one report.
///
/// # Endpoint
///
/// `POST /api/scan`
///
/// # Response
///
/// ```json
/// {
///   "target": { "absoluteUrl": "https://example.com", "hostname": "example.com", "registrableDomain": "example.com" },
///   "dns": { "status": "success", "data": { ... } },
///   "whois": { "status": "failure", "error": "Too many WHOIS requests, please wait" },
///   "headers": { "status": "success", "data": { ... } },
///   "social": { "status": "success", "data": { ... } }
/// }
/// ```
///
/// Each slot is rate limited with the quota of its single-scan endpoint.
/// Failed slots never fail the request.
///
/// # Errors
///
/// - **400 Bad Request**: missing or invalid `url`
pub async fn scan_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ScanRequest>, JsonRejection>,
) -> Result<Json<ScanReport>, AppError> {
    let client = client_token(&headers);
    let target = read_target(payload, &client)?;

    Ok(Json(state.scan_service.scan_all(target, &client).await))
}
