//! WHOIS lookups for the registrable domain of a target.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{NormalizedTarget, WhoisScan};
use crate::domain::lookups::{LookupError, WhoisClient};
use crate::error::AppError;
use crate::utils::whois_summary::summarize;
use serde_json::json;
use tracing::{error, info};

pub struct WhoisService {
    client: Arc<dyn WhoisClient>,
    timeout: Duration,
}

impl WhoisService {
    pub fn new(client: Arc<dyn WhoisClient>, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Looks up the registrable domain (`www.example.co.uk` → `example.co.uk`).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the lookup fails or times out. The
    /// cause is logged, not returned.
    pub async fn scan(&self, target: &NormalizedTarget) -> Result<WhoisScan, AppError> {
        let root_domain = target.registrable_domain();
        info!(hostname = target.hostname(), root_domain, "WHOIS scan started");

        let data = tokio::time::timeout(self.timeout, self.client.lookup(root_domain))
            .await
            .unwrap_or(Err(LookupError::Timeout(self.timeout)))
            .map_err(|e| {
                error!(root_domain, error = %e, "WHOIS lookup failed");
                AppError::internal("Failed to retrieve WHOIS data", json!({}))
            })?;

        let summary = summarize(&data);

        Ok(WhoisScan {
            hostname: target.hostname().to_string(),
            root_domain: root_domain.to_string(),
            data,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::WhoisTree;
    use crate::domain::lookups::MockWhoisClient;

    fn registry_tree() -> WhoisTree {
        json!({
            "whois.nic.uk": {
                "Registrar": "Nominet Registrar",
                "Registrant Organization": "Example Ltd"
            }
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    #[tokio::test]
    async fn test_queries_registrable_domain() {
        let mut client = MockWhoisClient::new();
        client
            .expect_lookup()
            .withf(|domain| domain.to_string() == "example.co.uk")
            .times(1)
            .returning(|_| Ok(registry_tree()));

        let target = NormalizedTarget::parse(Some("https://a.b.example.co.uk/path")).unwrap();
        let scan = WhoisService::new(Arc::new(client), Duration::from_secs(1))
            .scan(&target)
            .await
            .unwrap();

        assert_eq!(scan.hostname, "a.b.example.co.uk");
        assert_eq!(scan.root_domain, "example.co.uk");
        assert!(scan.data.contains_key("whois.nic.uk"));

        let summary = scan.summary.unwrap();
        assert_eq!(summary.registrar.as_deref(), Some("Nominet Registrar"));
        assert_eq!(summary.organization, "Example Ltd");
    }

    #[tokio::test]
    async fn test_lookup_failure_is_internal_error() {
        let mut client = MockWhoisClient::new();
        client
            .expect_lookup()
            .returning(|_| Err(LookupError::Unreachable("connection refused".to_string())));

        let target = NormalizedTarget::parse(Some("example.com")).unwrap();
        let err = WhoisService::new(Arc::new(client), Duration::from_secs(1))
            .scan(&target)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Internal { .. }));
        assert_eq!(err.to_string(), "Failed to retrieve WHOIS data");
    }

    #[tokio::test]
    async fn test_summary_absent_for_unrecognized_tree() {
        let mut client = MockWhoisClient::new();
        client
            .expect_lookup()
            .returning(|_| Ok(WhoisTree::new()));

        let target = NormalizedTarget::parse(Some("example.com")).unwrap();
        let scan = WhoisService::new(Arc::new(client), Duration::from_secs(1))
            .scan(&target)
            .await
            .unwrap();

        assert!(scan.summary.is_none());
    }
}
