//! HTTP request handlers for API endpoints.
//!
//! One module per scan endpoint, plus the full report and health check.

pub mod dns;
pub mod headers;
pub mod health;
pub mod scan;
pub mod social;
pub mod whois;

pub use dns::dns_scan_handler;
pub use headers::headers_scan_handler;
pub use health::health_handler;
pub use scan::scan_handler;
pub use social::social_scan_handler;
pub use whois::whois_scan_handler;

use axum::{Json, extract::rejection::JsonRejection};
use serde_json::json;
use tracing::{info, warn};
use validator::Validate;

use crate::api::dto::scan::ScanRequest;
use crate::domain::entities::{NormalizedTarget, ScanKind};
use crate::error::AppError;

/// Turns the raw request body into a validated scan target.
///
/// Malformed JSON, a missing body, a missing or empty `url` and URLs that do
/// not normalize all end up as [`AppError::Validation`]. Every rejection is
/// logged with the raw `url` and `client`.
pub(crate) fn read_target(
    payload: Result<Json<ScanRequest>, JsonRejection>,
    client: &str,
) -> Result<NormalizedTarget, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        let err = AppError::bad_request(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        );
        warn!(client, error = %err, reason = %rejection.body_text(), "Rejected scan request");
        err
    })?;

    request
        .validate()
        .map_err(AppError::from)
        .and_then(|_| NormalizedTarget::parse(request.url.as_deref()))
        .inspect_err(|err| {
            warn!(
                client,
                url = request.url.as_deref().unwrap_or_default(),
                error = %err,
                "Rejected scan request"
            );
        })
}

pub(crate) fn log_scan_started(kind: ScanKind, target: &NormalizedTarget, client: &str) {
    info!(scan = kind.as_str(), hostname = target.hostname(), client, "Scan requested");
}

/// Logs a failed single scan right before the error response is sent.
pub(crate) fn log_scan_failed(
    kind: ScanKind,
    target: &NormalizedTarget,
    client: &str,
    error: &AppError,
) {
    warn!(
        scan = kind.as_str(),
        hostname = target.hostname(),
        client,
        status = error.status_code().as_u16(),
        error = %error,
        "Scan failed"
    );
}


#[cfg(test)]
mod tests {
    use super::test_support::CapturedLogs;
    use super::*;

    fn body(url: Option<&str>) -> Result<Json<ScanRequest>, JsonRejection> {
        Ok(Json(ScanRequest {
            url: url.map(str::to_string),
        }))
    }

    #[test]
    fn test_read_target_ok() {
        let target = read_target(body(Some("example.com")), "203.0.113.7").unwrap();
        assert_eq!(target.hostname(), "example.com");
    }

    #[test]
    fn test_rejection_logged_with_client_and_target() {
        let logs = CapturedLogs::default();

        let result = tracing::subscriber::with_default(logs.subscriber(), || {
            read_target(body(Some("not a url")), "203.0.113.7")
        });

        assert!(matches!(result, Err(AppError::Validation { .. })));
        let output = logs.contents();
        assert!(output.contains("Rejected scan request"));
        assert!(output.contains("client=\"203.0.113.7\""));
        assert!(output.contains("url=\"not a url\""));
    }

    #[test]
    fn test_missing_url_logged_with_client() {
        let logs = CapturedLogs::default();

        let result = tracing::subscriber::with_default(logs.subscriber(), || {
            read_target(body(None), "198.51.100.4")
        });

        assert!(result.is_err());
        assert!(logs.contents().contains("client=\"198.51.100.4\""));
    }

    #[test]
    fn test_scan_failure_logged_with_client() {
        let logs = CapturedLogs::default();
        let target = NormalizedTarget::parse(Some("www.example.com")).unwrap();
        let error = AppError::internal("Failed to retrieve WHOIS data", json!({}));

        tracing::subscriber::with_default(logs.subscriber(), || {
            log_scan_failed(ScanKind::Whois, &target, "203.0.113.7", &error)
        });

        let output = logs.contents();
        assert!(output.contains("Scan failed"));
        assert!(output.contains("scan=\"whois\""));
        assert!(output.contains("hostname=\"www.example.com\""));
        assert!(output.contains("client=\"203.0.113.7\""));
        assert!(output.contains("status=500"));
    }
}
