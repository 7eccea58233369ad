//! API route configuration.

use crate::api::handlers::{
    dns_scan_handler, headers_scan_handler, scan_handler, social_scan_handler, whois_scan_handler,
};
use crate::api::middleware::rate_limit;
use crate::infrastructure::rate_limit::ScanLimiter;
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{MethodRouter, post},
};

/// All scan routes.
///
/// # Endpoints
///
/// - `POST /scan/dns`      - DNS records
/// - `POST /scan/whois`    - WHOIS registration data
/// - `POST /scan/headers`  - Security header checklist
/// - `POST /scan/social`   - Social links and contact emails
/// - `POST /scan`          - All of the above in one report
///
/// The four single-scan routes each sit behind their own per-client
/// limiter. The full scan applies the same limiters per slot instead.
pub fn scan_routes(state: &AppState) -> Router<AppState> {
    let limiters = &state.limiters;

    Router::new()
        .route("/scan", post(scan_handler))
        .route("/scan/dns", limited(post(dns_scan_handler), &limiters.dns))
        .route(
            "/scan/whois",
            limited(post(whois_scan_handler), &limiters.whois),
        )
        .route(
            "/scan/headers",
            limited(post(headers_scan_handler), &limiters.headers),
        )
        .route(
            "/scan/social",
            limited(post(social_scan_handler), &limiters.social),
        )
}

fn limited(route: MethodRouter<AppState>, limiter: &ScanLimiter) -> MethodRouter<AppState> {
    route.route_layer(middleware::from_fn_with_state(
        limiter.clone(),
        rate_limit::layer,
    ))
}
