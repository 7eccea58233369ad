//! Security header inspection.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{HeaderCheck, HeaderStatus, HeadersScan, NormalizedTarget};
use crate::domain::lookups::{FetchRequest, FetchedResponse, HttpFetcher, LookupError};
use crate::error::AppError;
use serde_json::json;
use tracing::{debug, info, warn};

struct ChecklistEntry {
    name: &'static str,
    label: &'static str,
    /// Reported as missing when absent.
    required: bool,
    /// Presence leaks stack details.
    discloses: bool,
}

const CHECKLIST: &[ChecklistEntry] = &[
    ChecklistEntry {
        name: "strict-transport-security",
        label: "HSTS (Strict-Transport-Security)",
        required: true,
        discloses: false,
    },
    ChecklistEntry {
        name: "content-security-policy",
        label: "CSP (Content-Security-Policy)",
        required: true,
        discloses: false,
    },
    ChecklistEntry {
        name: "x-frame-options",
        label: "X-Frame-Options",
        required: true,
        discloses: false,
    },
    ChecklistEntry {
        name: "x-content-type-options",
        label: "X-Content-Type-Options",
        required: true,
        discloses: false,
    },
    ChecklistEntry {
        name: "referrer-policy",
        label: "Referrer-Policy",
        required: false,
        discloses: false,
    },
    ChecklistEntry {
        name: "permissions-policy",
        label: "Permissions-Policy",
        required: false,
        discloses: false,
    },
    ChecklistEntry {
        name: "server",
        label: "Server Banner",
        required: false,
        discloses: false,
    },
    ChecklistEntry {
        name: "x-powered-by",
        label: "X-Powered-By",
        required: false,
        discloses: true,
    },
];

const METHOD_NOT_ALLOWED: u16 = 405;

pub struct HeadersService {
    fetcher: Arc<dyn HttpFetcher>,
    timeout: Duration,
}

impl HeadersService {
    /// `timeout` applies to each attempt separately.
    pub fn new(fetcher: Arc<dyn HttpFetcher>, timeout: Duration) -> Self {
        Self { fetcher, timeout }
    }

    /// Fetches the target with `HEAD` (falling back to one `GET` on 405) and
    /// grades the response headers.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UpstreamUnreachable`] when the target cannot be
    /// reached or does not answer in time.
    pub async fn scan(&self, target: &NormalizedTarget) -> Result<HeadersScan, AppError> {
        let url = target.absolute_url();
        info!(url, "Headers scan started");

        let response = self.fetch(url).await.map_err(|e| {
            warn!(url, error = %e, "Headers target unreachable");
            AppError::upstream_unreachable(
                "Unable to reach the target (timeout or TLS error)",
                json!({ "url": url }),
            )
        })?;

        let raw_headers = collect_headers(&response);

        Ok(HeadersScan {
            url: url.to_string(),
            final_url: response.final_url,
            status_code: response.status,
            security_analysis: analyze_headers(&raw_headers),
            raw_headers,
        })
    }

    async fn fetch(&self, url: &str) -> Result<FetchedResponse, LookupError> {
        let response = self
            .fetcher
            .fetch(FetchRequest::head(url, self.timeout))
            .await?;

        if response.status != METHOD_NOT_ALLOWED {
            return Ok(response);
        }

        debug!(url, "HEAD not allowed, retrying with GET");
        self.fetcher
            .fetch(FetchRequest::get(url, self.timeout).headers_only())
            .await
    }
}

/// Lowercase header map; repeated headers are joined with `", "`.
fn collect_headers(response: &FetchedResponse) -> BTreeMap<String, String> {
    let mut headers: BTreeMap<String, String> = BTreeMap::new();

    for (name, value) in &response.headers {
        headers
            .entry(name.to_ascii_lowercase())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.clone());
    }

    headers
}

/// Grades `headers` against the security checklist, in checklist order.
///
/// Present headers are `present`, except information-disclosing ones which
/// are `warning`. Absent headers are listed as `missing` only when they are
/// required; optional ones are left out.
pub fn analyze_headers(headers: &BTreeMap<String, String>) -> Vec<HeaderCheck> {
    CHECKLIST
        .iter()
        .filter_map(|entry| match headers.get(entry.name) {
            Some(value) if !value.is_empty() => {
                let (status, message) = if entry.discloses {
                    (HeaderStatus::Warning, "Potential technology disclosure.")
                } else {
                    (HeaderStatus::Present, "Present.")
                };

                Some(HeaderCheck {
                    header: entry.label.to_string(),
                    status,
                    value: Some(value.clone()),
                    message: message.to_string(),
                })
            }
            _ if entry.required => Some(HeaderCheck {
                header: entry.label.to_string(),
                status: HeaderStatus::Missing,
                value: None,
                message: "Recommended for security.".to_string(),
            }),
            _ => None,
        })
        .collect()
}
