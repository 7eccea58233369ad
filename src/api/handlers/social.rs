//! Handler for the social scan endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::HeaderMap};

use super::{log_scan_failed, log_scan_started, read_target};
use crate::api::dto::scan::ScanRequest;
use crate::domain::entities::{ScanKind, SocialScan};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_token;

/// Scrapes social profile links and contact emails from the target page.
///
/// # Endpoint
///
/// `POST /api/scan/social`
///
/// # Errors
///
/// - **400 Bad Request**: missing or invalid `url`
/// - **429 Too Many Requests**: per-client quota exhausted
/// - **4xx/5xx**: the target's own non-success status, passed through
/// - **500 Internal Server Error**: page could not be fetched
pub async fn social_scan_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ScanRequest>, JsonRejection>,
) -> Result<Json<SocialScan>, AppError> {
    let client = client_token(&headers);
    let target = read_target(payload, &client)?;
    log_scan_started(ScanKind::Social, &target, &client);

    state
        .social_service
        .scan(&target)
        .await
        .map(Json)
        .inspect_err(|e| log_scan_failed(ScanKind::Social, &target, &client, e))
}
