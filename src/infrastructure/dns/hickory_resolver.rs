use crate::domain::lookups::{DnsResolver, LookupError, RecordKind};
use async_trait::async_trait;
use hickory_resolver::TokioAsyncResolver;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use std::time::Duration;
use tracing::debug;

/// Async resolver using the public upstream configuration of hickory.
///
/// Each query is bounded by the resolver's own timeout, with one retry.
pub struct HickoryDnsResolver {
    resolver: TokioAsyncResolver,
    timeout: Duration,
}

impl HickoryDnsResolver {
    pub fn new(timeout: Duration) -> Self {
        let mut opts = ResolverOpts::default();
        opts.timeout = timeout;
        opts.attempts = 1;

        Self {
            resolver: TokioAsyncResolver::tokio(ResolverConfig::default(), opts),
            timeout,
        }
    }

    fn map_error(&self, error: ResolveError) -> LookupError {
        match error.kind() {
            ResolveErrorKind::NoRecordsFound { .. } => LookupError::NoRecords,
            ResolveErrorKind::Timeout => LookupError::Timeout(self.timeout),
            _ => LookupError::Failed(error.to_string()),
        }
    }
}

#[async_trait]
impl DnsResolver for HickoryDnsResolver {
    async fn resolve(&self, hostname: &str, kind: RecordKind) -> Result<Vec<String>, LookupError> {
        debug!(hostname, record = %kind, "Resolving");

        let records = match kind {
            RecordKind::A => self
                .resolver
                .ipv4_lookup(hostname)
                .await
                .map(|lookup| lookup.iter().map(|a| a.to_string()).collect()),
            RecordKind::Aaaa => self
                .resolver
                .ipv6_lookup(hostname)
                .await
                .map(|lookup| lookup.iter().map(|aaaa| aaaa.to_string()).collect()),
            RecordKind::Mx => self.resolver.mx_lookup(hostname).await.map(|lookup| {
                lookup
                    .iter()
                    .map(|mx| {
                        format!(
                            "{} {}",
                            mx.preference(),
                            strip_root_dot(&mx.exchange().to_utf8())
                        )
                    })
                    .collect()
            }),
            RecordKind::Txt => self.resolver.txt_lookup(hostname).await.map(|lookup| {
                lookup
                    .iter()
                    .flat_map(|txt| flatten_txt(txt.txt_data()))
                    .collect()
            }),
            RecordKind::Ns => self.resolver.ns_lookup(hostname).await.map(|lookup| {
                lookup
                    .iter()
                    .map(|ns| strip_root_dot(&ns.to_utf8()))
                    .collect()
            }),
        };

        records.map_err(|e| self.map_error(e))
    }
}

/// One entry per character-string of a TXT record.
fn flatten_txt(chunks: &[Box<[u8]>]) -> Vec<String> {
    chunks
        .iter()
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect()
}

fn strip_root_dot(name: &str) -> String {
    name.strip_suffix('.').unwrap_or(name).to_string()
}
