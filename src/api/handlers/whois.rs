//! Handler for the WHOIS scan endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::HeaderMap};

use super::{log_scan_failed, log_scan_started, read_target};
use crate::api::dto::scan::ScanRequest;
use crate::domain::entities::{ScanKind, WhoisScan};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_token;

/// Fetches registration data for the target's registrable domain.
///
/// # Endpoint
///
/// `POST /api/scan/whois`
///
/// # Response
///
/// ```json
/// {
///   "hostname": "www.example.com",
///   "rootDomain": "example.com",
///   "data": { "whois.verisign-grs.com": { "Registrar": "..." } },
///   "summary": { "registrar": "...", "organization": "Redacted", ... }
/// }
/// ```
///
/// # Errors
///
/// - **400 Bad Request**: missing or invalid `url`
/// - **429 Too Many Requests**: per-client quota exhausted (stricter than other scans)
/// - **500 Internal Server Error**: lookup failed
pub async fn whois_scan_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ScanRequest>, JsonRejection>,
) -> Result<Json<WhoisScan>, AppError> {
    let client = client_token(&headers);
    let target = read_target(payload, &client)?;
    log_scan_started(ScanKind::Whois, &target, &client);

    state
        .whois_service
        .scan(&target)
        .await
        .map(Json)
        .inspect_err(|e| log_scan_failed(ScanKind::Whois, &target, &client, e))
}
