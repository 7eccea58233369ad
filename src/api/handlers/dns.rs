//! Handler for the DNS scan endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::HeaderMap};

use super::{log_scan_started, read_target};
use crate::api::dto::scan::ScanRequest;
use crate::domain::entities::{ScanKind, DnsScan};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_token;

/// Resolves A, AAAA, MX, TXT and NS records of the target's hostname.
///
/// # Endpoint
///
/// `POST /api/scan/dns`
///
/// # Response
///
/// ```json
/// {
///   "hostname": "example.com",
///   "timestamp": "2024-05-01T10:00:00Z",
///   "records": {
///     "A": ["93.184.215.14"],
///     "AAAA": [],
///     "MX": ["0 ."],
///     "TXT": ["v=spf1 -all"],
///     "NS": ["a.iana-servers.net"]
///   }
/// }
/// ```
///
/// A record type whose lookup failed is an empty list.
///
/// # Errors
///
/// - **400 Bad Request**: missing or invalid `url`
/// - **429 Too Many Requests**: per-client quota exhausted
pub async fn dns_scan_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ScanRequest>, JsonRejection>,
) -> Result<Json<DnsScan>, AppError> {
    let client = client_token(&headers);
    let target = read_target(payload, &client)?;
    log_scan_started(ScanKind::Dns, &target, &client);

    Ok(Json(state.dns_service.scan(&target).await))
}
