//! Full scan: all four lookups for one target, side by side.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{DnsService, HeadersService, SocialService, WhoisService};
use crate::domain::entities::{NormalizedTarget, ScanKind, ScanReport};
use crate::error::AppError;
use crate::infrastructure::rate_limit::ScanLimiters;
use serde_json::json;
use tracing::{info, warn};

/// Runs the DNS, WHOIS, headers and social scans concurrently.
///
/// Every slot settles on its own: a slot that is rate limited, fails, or
/// exceeds the deadline becomes a failure entry while the others still
/// report their data. Each slot draws from the same per-kind quota as the
/// matching single-scan endpoint.
pub struct ScanService {
    dns: Arc<DnsService>,
    whois: Arc<WhoisService>,
    headers: Arc<HeadersService>,
    social: Arc<SocialService>,
    limiters: Arc<ScanLimiters>,
    deadline: Duration,
}

impl ScanService {
    pub fn new(
        dns: Arc<DnsService>,
        whois: Arc<WhoisService>,
        headers: Arc<HeadersService>,
        social: Arc<SocialService>,
        limiters: Arc<ScanLimiters>,
        deadline: Duration,
    ) -> Self {
        Self {
            dns,
            whois,
            headers,
            social,
            limiters,
            deadline,
        }
    }

    pub async fn scan_all(&self, target: NormalizedTarget, client: &str) -> ScanReport {
        info!(hostname = target.hostname(), client, "Full scan started");

        let (dns, whois, headers, social) = tokio::join!(
            self.run_slot(ScanKind::Dns, client, async {
                Ok(self.dns.scan(&target).await)
            }),
            self.run_slot(ScanKind::Whois, client, self.whois.scan(&target)),
            self.run_slot(ScanKind::Headers, client, self.headers.scan(&target)),
            self.run_slot(ScanKind::Social, client, self.social.scan(&target)),
        );

        let report = ScanReport {
            target,
            dns: dns.into(),
            whois: whois.into(),
            headers: headers.into(),
            social: social.into(),
        };

        info!(
            hostname = report.target.hostname(),
            failures = report.failure_count(),
            "Full scan finished"
        );

        report
    }

    async fn run_slot<T>(
        &self,
        kind: ScanKind,
        client: &str,
        scan: impl Future<Output = Result<T, AppError>>,
    ) -> Result<T, AppError> {
        let limiter = self.limiters.get(kind);
        let status = limiter.check(client);

        if status.is_limited {
            return Err(AppError::rate_limited(
                format!("Too many {} requests, please wait", kind.label()),
                json!({ "limit": status.limit }),
            ));
        }

        let result = tokio::time::timeout(self.deadline, scan)
            .await
            .unwrap_or_else(|_| {
                Err(AppError::internal(
                    format!("{} scan timed out", kind.label()),
                    json!({ "deadline_seconds": self.deadline.as_secs() }),
                ))
            });

        if let Err(e) = &result {
            warn!(scan = %kind, client, error = %e, "Scan slot failed");
        }

        result
    }
}
