use crate::domain::lookups::{FetchMethod, FetchRequest, FetchedResponse, HttpFetcher, LookupError};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use tracing::debug;

pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Bodies are truncated past this many bytes.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Shared `reqwest` client following redirects with an identifying user agent.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    /// # Errors
    ///
    /// Returns an error if `user_agent` is not a valid header value or the
    /// TLS backend fails to initialize.
    pub fn new(user_agent: &str) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_str(user_agent).context("USER_AGENT is not a valid header value")?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client })
    }

    async fn read_body(response: &mut reqwest::Response) -> Result<String, reqwest::Error> {
        let mut body = Vec::new();

        while let Some(chunk) = response.chunk().await? {
            let room = MAX_BODY_BYTES - body.len();
            if chunk.len() >= room {
                body.extend_from_slice(&chunk[..room]);
                break;
            }
            body.extend_from_slice(&chunk);
        }

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

#[async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchedResponse, LookupError> {
        let method = match request.method {
            FetchMethod::Head => reqwest::Method::HEAD,
            FetchMethod::Get => reqwest::Method::GET,
        };
        let timeout = request.timeout;
        let map_error = |e: reqwest::Error| {
            if e.is_timeout() {
                LookupError::Timeout(timeout)
            } else {
                LookupError::Unreachable(e.to_string())
            }
        };

        debug!(method = %method, url = %request.url, "Fetching");

        let mut response = self
            .client
            .request(method, &request.url)
            .timeout(timeout)
            .send()
            .await
            .map_err(map_error)?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        let body = if request.read_body {
            Self::read_body(&mut response).await.map_err(map_error)?
        } else {
            String::new()
        };

        Ok(FetchedResponse {
            status,
            final_url,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{header as header_matcher, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn fetcher() -> ReqwestFetcher {
        ReqwestFetcher::new("ReconTest/1.0").unwrap()
    }

    #[tokio::test]
    async fn test_get_reads_body_and_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .and(header_matcher("user-agent", "ReconTest/1.0"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("X-Frame-Options", "DENY")
                    .set_body_string("<a href=\"https://github.com/acme\">gh</a>"),
            )
            .mount(&server)
            .await;

        let response = fetcher()
            .fetch(FetchRequest::get(format!("{}/", server.uri()), TIMEOUT))
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert!(response.body.contains("github.com/acme"));
        assert!(
            response
                .headers
                .contains(&("x-frame-options".to_string(), "DENY".to_string()))
        );
    }

    #[tokio::test]
    async fn test_headers_only_skips_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ignored"))
            .mount(&server)
            .await;

        let request = FetchRequest::get(server.uri(), TIMEOUT).headers_only();
        let response = fetcher().fetch(request).await.unwrap();

        assert!(response.body.is_empty());
    }

    #[tokio::test]
    async fn test_non_success_status_is_not_error() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(405))
            .mount(&server)
            .await;

        let response = fetcher()
            .fetch(FetchRequest::head(server.uri(), TIMEOUT))
            .await
            .unwrap();

        assert_eq!(response.status, 405);
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn test_redirect_followed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/old"))
            .respond_with(
                ResponseTemplate::new(301).insert_header("Location", format!("{}/new", server.uri())),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/new"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let response = fetcher()
            .fetch(FetchRequest::get(format!("{}/old", server.uri()), TIMEOUT))
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.final_url, format!("{}/new", server.uri()));
    }

    #[tokio::test]
    async fn test_timeout_mapped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let err = fetcher()
            .fetch(FetchRequest::get(server.uri(), Duration::from_millis(100)))
            .await
            .unwrap_err();

        assert!(matches!(err, LookupError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_unreachable() {
        let err = fetcher()
            .fetch(FetchRequest::get("http://127.0.0.1:1/", TIMEOUT))
            .await
            .unwrap_err();

        assert!(matches!(err, LookupError::Unreachable(_)));
    }

    #[tokio::test]
    async fn test_body_truncated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("a".repeat(MAX_BODY_BYTES + 100)))
            .mount(&server)
            .await;

        let response = fetcher()
            .fetch(FetchRequest::get(server.uri(), TIMEOUT))
            .await
            .unwrap();

        assert_eq!(response.body.len(), MAX_BODY_BYTES);
    }

    #[test]
    fn test_invalid_user_agent_rejected() {
        assert!(ReqwestFetcher::new("bad\nagent").is_err());
    }
}
