//! One rate limit store per scan kind.

use super::limiter::{RateLimitStatus, RateLimiter};
use crate::config::Config;
use crate::domain::entities::ScanKind;
use std::sync::Arc;
use std::time::Duration;

/// A store bound to the quota of one scan kind.
#[derive(Debug, Clone)]
pub struct ScanLimiter {
    kind: ScanKind,
    limit: u32,
    store: Arc<RateLimiter>,
}

impl ScanLimiter {
    pub fn new(kind: ScanKind, limit: u32, store: Arc<RateLimiter>) -> Self {
        Self { kind, limit, store }
    }

    pub fn kind(&self) -> ScanKind {
        self.kind
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn check(&self, token: &str) -> RateLimitStatus {
        self.store.check(self.limit, token)
    }

    pub fn tracked_clients(&self) -> usize {
        self.store.tracked_clients()
    }
}

/// The four per-kind limiters shared by the HTTP endpoints and the orchestrator.
///
/// A single-kind endpoint and the matching slot of a full scan draw from the
/// same quota.
#[derive(Debug, Clone)]
pub struct ScanLimiters {
    pub dns: ScanLimiter,
    pub whois: ScanLimiter,
    pub headers: ScanLimiter,
    pub social: ScanLimiter,
}

impl ScanLimiters {
    pub fn from_config(config: &Config) -> Self {
        let window = Duration::from_secs(config.rate_limit_window_seconds);
        let store = || Arc::new(RateLimiter::new(window, config.rate_limit_max_clients));

        Self::with_stores(config, store(), store(), store(), store())
    }

    /// Builds the limiters on top of caller-supplied stores.
    pub fn with_stores(
        config: &Config,
        dns: Arc<RateLimiter>,
        whois: Arc<RateLimiter>,
        headers: Arc<RateLimiter>,
        social: Arc<RateLimiter>,
    ) -> Self {
        Self {
            dns: ScanLimiter::new(ScanKind::Dns, config.scan_rate_limit, dns),
            whois: ScanLimiter::new(ScanKind::Whois, config.whois_rate_limit, whois),
            headers: ScanLimiter::new(ScanKind::Headers, config.scan_rate_limit, headers),
            social: ScanLimiter::new(ScanKind::Social, config.scan_rate_limit, social),
        }
    }

    pub fn get(&self, kind: ScanKind) -> &ScanLimiter {
        match kind {
            ScanKind::Dns => &self.dns,
            ScanKind::Whois => &self.whois,
            ScanKind::Headers => &self.headers,
            ScanKind::Social => &self.social,
        }
    }
}
