//! Per-client quota enforcement for the single-scan endpoints.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AppError;
use crate::infrastructure::rate_limit::{RateLimitStatus, ScanLimiter};
use crate::utils::client_ip::client_token;

pub const LIMIT_HEADER: &str = "x-ratelimit-limit";
pub const REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Counts the request against the client's quota before anything else runs.
///
/// The client is identified by the first `X-Forwarded-For` entry. The check
/// happens ahead of body parsing, so requests later rejected as invalid still
/// consume quota.
///
/// # Errors
///
/// Returns `429 Too Many Requests` once the client exceeds the limit. Every
/// response, limited or not, carries `X-RateLimit-Limit` and
/// `X-RateLimit-Remaining`.
///
/// # Example
///
/// ```rust,ignore
/// let routes = Router::new().route(
///     "/scan/dns",
///     post(dns_scan_handler).route_layer(middleware::from_fn_with_state(
///         state.limiters.dns.clone(),
///         rate_limit::layer,
///     )),
/// );
/// ```
pub async fn layer(State(limiter): State<ScanLimiter>, req: Request, next: Next) -> Response {
    let client = client_token(req.headers());
    let status = limiter.check(&client);

    let mut response = if status.is_limited {
        AppError::rate_limited(
            format!("Too many {} requests, please wait", limiter.kind().label()),
            json!({ "limit": status.limit, "scan": limiter.kind().as_str() }),
        )
        .into_response()
    } else {
        next.run(req).await
    };

    insert_quota_headers(response.headers_mut(), &status);
    response
}

fn insert_quota_headers(headers: &mut HeaderMap, status: &RateLimitStatus) {
    headers.insert(LIMIT_HEADER, HeaderValue::from(status.limit));
    headers.insert(REMAINING_HEADER, HeaderValue::from(status.remaining));
}
