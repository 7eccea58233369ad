//! Normalized scan target derived from raw user input.

use crate::error::AppError;
use crate::utils::registrable_domain::registrable_domain;
use crate::utils::url_normalizer::{extract_hostname, is_valid_url, normalize_url};
use serde::Serialize;
use serde_json::json;

/// The canonical form of a scan target.
///
/// Built once per request by [`NormalizedTarget::parse`] and immutable
/// afterwards. `absolute_url` always carries an explicit `http`/`https`
/// scheme; `registrable_domain` is the eTLD+1 of `hostname`, or `hostname`
/// itself when the public suffix lookup fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedTarget {
    absolute_url: String,
    hostname: String,
    registrable_domain: String,
}

impl NormalizedTarget {
    /// Normalizes and validates raw input.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the input is missing or empty, the
    /// normalized URL is not a valid http(s) URL, or no hostname can be
    /// extracted from it.
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        let raw = raw
            .filter(|raw| !raw.is_empty())
            .ok_or_else(|| AppError::bad_request("URL is required", json!({})))?;

        let absolute_url = normalize_url(raw);
        if !is_valid_url(&absolute_url) {
            return Err(AppError::bad_request(
                "Invalid URL",
                json!({ "url": absolute_url }),
            ));
        }

        let hostname = extract_hostname(&absolute_url);
        if hostname.is_empty() {
            return Err(AppError::bad_request(
                "Unable to extract a hostname from the URL",
                json!({ "url": absolute_url }),
            ));
        }

        let registrable_domain = registrable_domain(&hostname);

        Ok(Self {
            absolute_url,
            hostname,
            registrable_domain,
        })
    }

    pub fn absolute_url(&self) -> &str {
        &self.absolute_url
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn registrable_domain(&self) -> &str {
        &self.registrable_domain
    }
}
