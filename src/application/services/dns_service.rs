//! DNS record collection.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{DnsRecords, DnsScan, NormalizedTarget};
use crate::domain::lookups::{DnsResolver, LookupError, RecordKind};
use chrono::Utc;
use tracing::{debug, info};

/// Resolves the five record types of a hostname concurrently.
///
/// A record type whose lookup fails or times out is reported as an empty
/// list; the scan itself never fails because of the resolver.
pub struct DnsService {
    resolver: Arc<dyn DnsResolver>,
    timeout: Duration,
}

impl DnsService {
    pub fn new(resolver: Arc<dyn DnsResolver>, timeout: Duration) -> Self {
        Self { resolver, timeout }
    }

    pub async fn scan(&self, target: &NormalizedTarget) -> DnsScan {
        let hostname = target.hostname();
        info!(hostname, "DNS scan started");

        let (a, aaaa, mx, txt, ns) = tokio::join!(
            self.resolve_or_empty(hostname, RecordKind::A),
            self.resolve_or_empty(hostname, RecordKind::Aaaa),
            self.resolve_or_empty(hostname, RecordKind::Mx),
            self.resolve_or_empty(hostname, RecordKind::Txt),
            self.resolve_or_empty(hostname, RecordKind::Ns),
        );

        DnsScan {
            hostname: hostname.to_string(),
            timestamp: Utc::now(),
            records: DnsRecords {
                a,
                aaaa,
                mx,
                txt,
                ns,
            },
        }
    }

    async fn resolve_or_empty(&self, hostname: &str, kind: RecordKind) -> Vec<String> {
        let result = tokio::time::timeout(self.timeout, self.resolver.resolve(hostname, kind))
            .await
            .unwrap_or(Err(LookupError::Timeout(self.timeout)));

        match result {
            Ok(records) => records,
            Err(LookupError::NoRecords) => Vec::new(),
            Err(e) => {
                debug!(hostname, record = %kind, error = %e, "DNS lookup failed");
                Vec::new()
            }
        }
    }
}
