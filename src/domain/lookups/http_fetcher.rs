//! Outbound HTTP port used by the header and social scans.

use super::LookupError;
use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMethod {
    Head,
    Get,
}

/// A single request against the scan target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub method: FetchMethod,
    pub url: String,
    /// Deadline for the whole exchange, body included.
    pub timeout: Duration,
    /// When `false` the body is not read and [`FetchedResponse::body`] is empty.
    pub read_body: bool,
}

impl FetchRequest {
    pub fn head(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            method: FetchMethod::Head,
            url: url.into(),
            timeout,
            read_body: false,
        }
    }

    pub fn get(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            method: FetchMethod::Get,
            url: url.into(),
            timeout,
            read_body: true,
        }
    }

    /// Same request without reading the body.
    pub fn headers_only(mut self) -> Self {
        self.read_body = false;
        self
    }
}

/// Response after redirects have been followed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedResponse {
    pub status: u16,
    pub final_url: String,
    /// Header pairs in wire order; names lowercase, duplicates kept.
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl FetchedResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs one HTTP exchange.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::ReqwestFetcher`] - reqwest backed, follows redirects
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    /// Sends `request` and returns the final response of the redirect chain.
    ///
    /// Non-success statuses are not errors.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Timeout`] when the deadline passes and
    /// [`LookupError::Unreachable`] on connection, TLS or transport failures.
    async fn fetch(&self, request: FetchRequest) -> Result<FetchedResponse, LookupError>;
}
