//! Social profile and contact email scraping.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{NormalizedTarget, SocialScan};
use crate::domain::lookups::{FetchRequest, HttpFetcher};
use crate::error::AppError;
use crate::utils::page_scraper::{extract_emails, extract_social_links};
use serde_json::json;
use tracing::{error, info};

pub struct SocialService {
    fetcher: Arc<dyn HttpFetcher>,
    timeout: Duration,
}

impl SocialService {
    pub fn new(fetcher: Arc<dyn HttpFetcher>, timeout: Duration) -> Self {
        Self { fetcher, timeout }
    }

    /// Downloads the target page and scrapes it.
    ///
    /// Only the part of the body the fetcher returns is scraped; the reqwest
    /// fetcher stops at 2 MiB, which bounds the link scan as well as the
    /// email scan.
    ///
    /// # Errors
    ///
    /// - [`AppError::UpstreamStatus`] carrying the target's own status when
    ///   it answers with a non-2xx code
    /// - [`AppError::Internal`] when the page cannot be fetched at all
    pub async fn scan(&self, target: &NormalizedTarget) -> Result<SocialScan, AppError> {
        let url = target.absolute_url();
        info!(url, "Social scan started");

        let response = self
            .fetcher
            .fetch(FetchRequest::get(url, self.timeout))
            .await
            .map_err(|e| {
                error!(url, error = %e, "Social scan fetch failed");
                AppError::internal("Social scan failed", json!({}))
            })?;

        if !response.is_success() {
            return Err(AppError::upstream_status(
                response.status,
                format!("Unable to retrieve page content ({})", response.status),
                json!({ "url": url, "status": response.status }),
            ));
        }

        Ok(SocialScan {
            socials: extract_social_links(&response.body),
            emails: extract_emails(&response.body),
        })
    }
}
