//! Rate-limit client identity from HTTP request headers.

use axum::http::HeaderMap;

/// Header consulted for the originating client address.
pub const FORWARDED_FOR: &str = "x-forwarded-for";

/// Token used when no forwarded address is present.
pub const FALLBACK_CLIENT: &str = "127.0.0.1";

/// Derives the rate-limit token for a request.
///
/// Takes the first comma-separated entry of `X-Forwarded-For`, falling back
/// to the loopback address when the header is missing, empty, or not valid
/// UTF-8. The value is client-controlled, so it is only good enough for
/// best-effort abuse deterrence.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
///
/// assert_eq!(client_token(&headers), "203.0.113.7");
/// ```
pub fn client_token(headers: &HeaderMap) -> String {
    headers
        .get(FORWARDED_FOR)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .filter(|first| !first.is_empty())
        .unwrap_or(FALLBACK_CLIENT)
        .to_string()
}
