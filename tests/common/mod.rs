#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::routing::get;
use axum_test::TestServer;
use parking_lot::Mutex;
use reconsight::api::handlers::health_handler;
use reconsight::api::routes::scan_routes;
use reconsight::config::Config;
use reconsight::domain::entities::WhoisTree;
use reconsight::domain::lookups::{
    DnsResolver, FetchMethod, FetchRequest, FetchedResponse, HttpFetcher, LookupError,
    RecordKind, WhoisClient,
};
use reconsight::state::AppState;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

pub const SAMPLE_PAGE: &str = r#"
    <html><body>
        <a href="https://twitter.com/acme">Twitter</a>
        <a href="https://github.com/acme">GitHub</a>
        <a href="https://example.org/about">About</a>
        <p>Contact: hello@acme.test</p>
    </body></html>
"#;

/// Answers from a fixed table; unknown kinds have no records.
#[derive(Default)]
pub struct FakeResolver {
    records: HashMap<RecordKind, Result<Vec<String>, LookupError>>,
}

impl FakeResolver {
    pub fn with(mut self, kind: RecordKind, answer: Result<Vec<String>, LookupError>) -> Self {
        self.records.insert(kind, answer);
        self
    }

    pub fn typical() -> Self {
        Self::default()
            .with(RecordKind::A, Ok(vec!["93.184.216.34".to_string()]))
            .with(RecordKind::Mx, Ok(vec!["10 mail.example.com".to_string()]))
            .with(RecordKind::Ns, Ok(vec!["a.iana-servers.net".to_string()]))
    }
}

#[async_trait]
impl DnsResolver for FakeResolver {
    async fn resolve(&self, _hostname: &str, kind: RecordKind) -> Result<Vec<String>, LookupError> {
        self.records
            .get(&kind)
            .cloned()
            .unwrap_or(Err(LookupError::NoRecords))
    }
}

/// Returns one canned tree and remembers which domains were asked for.
pub struct FakeWhois {
    answer: Result<WhoisTree, LookupError>,
    queries: Mutex<Vec<String>>,
}

impl FakeWhois {
    pub fn answering(answer: Result<WhoisTree, LookupError>) -> Self {
        Self {
            answer,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn typical() -> Self {
        let tree = json!({
            "whois.verisign-grs.com": {
                "Registrar": "Example Registrar, Inc.",
                "Creation Date": "1995-08-14T04:00:00Z",
                "Registry Expiry Date": "2030-08-13T04:00:00Z"
            }
        });

        Self::answering(Ok(tree.as_object().cloned().unwrap_or_default()))
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl WhoisClient for FakeWhois {
    async fn lookup(&self, domain: &str) -> Result<WhoisTree, LookupError> {
        self.queries.lock().push(domain.to_string());
        self.answer.clone()
    }
}

type Responder = Box<dyn Fn(&FetchRequest) -> Result<FetchedResponse, LookupError> + Send + Sync>;

/// Serves every request through a closure and records what was asked.
pub struct FakeFetcher {
    respond: Responder,
    requests: Mutex<Vec<FetchRequest>>,
}

impl FakeFetcher {
    pub fn new(
        respond: impl Fn(&FetchRequest) -> Result<FetchedResponse, LookupError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            respond: Box::new(respond),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// `HEAD` gets a hardened header set, `GET` gets [`SAMPLE_PAGE`].
    pub fn typical() -> Self {
        Self::new(|request| match request.method {
            FetchMethod::Head => Ok(response(
                200,
                &[
                    ("strict-transport-security", "max-age=63072000"),
                    ("x-frame-options", "DENY"),
                    ("server", "nginx"),
                ],
                "",
            )),
            FetchMethod::Get => Ok(response(200, &[("content-type", "text/html")], SAMPLE_PAGE)),
        })
    }

    pub fn unreachable() -> Self {
        Self::new(|_| Err(LookupError::Unreachable("connection refused".to_string())))
    }

    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl HttpFetcher for FakeFetcher {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchedResponse, LookupError> {
        let answer = (self.respond)(&request);
        self.requests.lock().push(request);
        answer
    }
}

pub fn response(status: u16, headers: &[(&str, &str)], body: &str) -> FetchedResponse {
    FetchedResponse {
        status,
        final_url: "https://example.com/".to_string(),
        headers: headers
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect(),
        body: body.to_string(),
    }
}

pub struct Fakes {
    pub resolver: Arc<FakeResolver>,
    pub whois: Arc<FakeWhois>,
    pub fetcher: Arc<FakeFetcher>,
}

impl Default for Fakes {
    fn default() -> Self {
        Self {
            resolver: Arc::new(FakeResolver::typical()),
            whois: Arc::new(FakeWhois::typical()),
            fetcher: Arc::new(FakeFetcher::typical()),
        }
    }
}

pub fn test_config() -> Config {
    Config {
        dns_timeout_seconds: 1,
        whois_timeout_seconds: 1,
        headers_timeout_seconds: 1,
        social_timeout_seconds: 1,
        scan_deadline_seconds: 2,
        ..Config::default()
    }
}

pub fn create_test_state(fakes: &Fakes, config: &Config) -> AppState {
    AppState::new(
        fakes.resolver.clone(),
        fakes.whois.clone(),
        fakes.fetcher.clone(),
        config,
    )
}

pub fn test_server(fakes: &Fakes, config: &Config) -> TestServer {
    let state = create_test_state(fakes, config);

    let app = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", scan_routes(&state))
        .with_state(state);

    TestServer::new(app).unwrap()
}

pub fn default_server() -> TestServer {
    test_server(&Fakes::default(), &test_config())
}
