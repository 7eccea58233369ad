use super::parser::{find_field, parse_response};
use crate::domain::entities::WhoisTree;
use crate::domain::lookups::{LookupError, WhoisClient};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, warn};

const REFERRAL_KEYS: &[&str] = &["refer", "whois"];
const REGISTRAR_REFERRAL_KEYS: &[&str] = &["Registrar WHOIS Server", "Whois Server"];

/// WHOIS client following the IANA → registry → registrar referral chain.
///
/// The root server is asked about the TLD and names the registry; the
/// registry answer may name the registrar's own server. Every hop shares one
/// deadline and each answer is read up to a byte cap.
#[derive(Debug, Clone)]
pub struct TcpWhoisClient {
    root_server: String,
    port: u16,
    timeout: Duration,
    max_response_bytes: usize,
}

impl TcpWhoisClient {
    pub const DEFAULT_PORT: u16 = 43;
    pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 256 * 1024;
    /// Longest timeout honored; larger values are clamped.
    pub const MAX_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

    pub fn new(root_server: impl Into<String>, timeout: Duration) -> Self {
        Self {
            root_server: root_server.into(),
            port: Self::DEFAULT_PORT,
            timeout: timeout.min(Self::MAX_TIMEOUT),
            max_response_bytes: Self::DEFAULT_MAX_RESPONSE_BYTES,
        }
    }

    /// Port used for every server of the chain.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_max_response_bytes(mut self, max: usize) -> Self {
        self.max_response_bytes = max;
        self
    }

    async fn query(
        &self,
        server: &str,
        query: &str,
        deadline: Instant,
    ) -> Result<String, LookupError> {
        debug!(server, query, "WHOIS query");

        let exchange = async {
            let mut stream = TcpStream::connect((server, self.port))
                .await
                .map_err(|e| LookupError::Unreachable(format!("{}: {}", server, e)))?;

            stream
                .write_all(format!("{}\r\n", query).as_bytes())
                .await
                .map_err(|e| LookupError::Unreachable(format!("{}: {}", server, e)))?;

            let mut buf = Vec::new();
            (&mut stream)
                .take(self.max_response_bytes as u64)
                .read_to_end(&mut buf)
                .await
                .map_err(|e| LookupError::Failed(format!("{}: {}", server, e)))?;

            Ok::<_, LookupError>(String::from_utf8_lossy(&buf).into_owned())
        };

        timeout_at(deadline, exchange)
            .await
            .map_err(|_| LookupError::Timeout(self.timeout))?
    }
}

#[async_trait]
impl WhoisClient for TcpWhoisClient {
    async fn lookup(&self, domain: &str) -> Result<WhoisTree, LookupError> {
        let domain = domain.trim_end_matches('.').to_ascii_lowercase();
        validate_query(&domain)?;

        let deadline = Instant::now() + self.timeout;
        let tld = domain.rsplit('.').next().unwrap_or(&domain);

        let root_answer = parse_response(&self.query(&self.root_server, tld, deadline).await?);

        let Some(registry) = find_field(&root_answer, REFERRAL_KEYS).map(normalize_server) else {
            debug!(domain = %domain, "No registry referral; returning root answer");
            return Ok(WhoisTree::from_iter([(
                self.root_server.clone(),
                Value::Object(root_answer),
            )]));
        };

        let mut tree = WhoisTree::new();

        let registry_answer = match self
            .query(&registry, &query_for(&registry, &domain), deadline)
            .await
        {
            Ok(raw) => parse_response(&raw),
            Err(e) => {
                warn!(server = %registry, error = %e, "Registry WHOIS failed");
                tree.insert(self.root_server.clone(), Value::Object(root_answer));
                return Ok(tree);
            }
        };

        let registrar = find_field(&registry_answer, REGISTRAR_REFERRAL_KEYS)
            .map(normalize_server)
            .filter(|server| !server.is_empty() && *server != registry);

        tree.insert(registry, Value::Object(registry_answer));

        if let Some(registrar) = registrar {
            match self
                .query(&registrar, &query_for(&registrar, &domain), deadline)
                .await
            {
                Ok(raw) => {
                    tree.insert(registrar, Value::Object(parse_response(&raw)));
                }
                Err(e) => {
                    debug!(server = %registrar, error = %e, "Registrar WHOIS failed");
                }
            }
        }

        Ok(tree)
    }
}

/// Rejects anything that could smuggle a second line into the query.
fn validate_query(domain: &str) -> Result<(), LookupError> {
    if domain.is_empty() || domain.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(LookupError::InvalidQuery(domain.to_string()));
    }
    Ok(())
}

/// Query syntax expected by `server`.
fn query_for(server: &str, domain: &str) -> String {
    match server {
        "whois.verisign-grs.com" => format!("domain {}", domain),
        "whois.denic.de" => format!("-T dn,ace {}", domain),
        "whois.jprs.jp" => format!("{}/e", domain),
        _ => domain.to_string(),
    }
}

/// Bare hostname from a referral, which may be given as `whois://host` or
/// `https://host/`.
fn normalize_server(referral: &str) -> String {
    let host = referral
        .trim()
        .trim_start_matches("whois://")
        .trim_start_matches("https://")
        .trim_start_matches("http://");

    host.split(['/', ' '])
        .next()
        .unwrap_or(host)
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use tokio::io::{AsyncBufReadExt, BufReader};
    use tokio::net::TcpListener;

    type Responder = fn(&str) -> Option<String>;

    /// Local WHOIS server answering every connection through `respond`.
    async fn spawn_server(respond: Responder) -> (u16, Arc<Mutex<Vec<String>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let queries = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&queries);

        tokio::spawn(async move {
            loop {
                let Ok((socket, _)) = listener.accept().await else {
                    break;
                };
                let seen = Arc::clone(&seen);
                tokio::spawn(async move {
                    let (read, mut write) = socket.into_split();
                    let mut line = String::new();
                    BufReader::new(read).read_line(&mut line).await.unwrap();
                    let query = line.trim_end().to_string();
                    seen.lock().push(query.clone());

                    match respond(&query) {
                        Some(answer) => {
                            write.write_all(answer.as_bytes()).await.unwrap();
                        }
                        None => {
                            tokio::time::sleep(Duration::from_secs(5)).await;
                        }
                    }
                });
            }
        });

        (port, queries)
    }

    fn client(port: u16) -> TcpWhoisClient {
        TcpWhoisClient::new("127.0.0.1", Duration::from_secs(2)).with_port(port)
    }

    #[tokio::test]
    async fn test_follows_registry_and_registrar_referrals() {
        let (port, queries) = spawn_server(|query| {
            Some(match query {
                "test" => "refer: localhost\n".to_string(),
                "example.test" => "Domain Name: EXAMPLE.TEST\n\
                     Registrar WHOIS Server: whois://127.0.0.1/\n"
                    .to_string(),
                _ => format!("Registrant Organization: Acme\nQuery: {}\n", query),
            })
        })
        .await;

        let tree = client(port).lookup("Example.Test.").await.unwrap();

        assert_eq!(tree.keys().collect::<Vec<_>>(), vec!["localhost", "127.0.0.1"]);
        assert_eq!(tree["localhost"]["Domain Name"], "EXAMPLE.TEST");
        assert_eq!(tree["127.0.0.1"]["Registrant Organization"], "Acme");
        assert_eq!(
            *queries.lock(),
            vec!["test", "example.test", "example.test"]
        );
    }

    #[tokio::test]
    async fn test_oversized_timeout_is_clamped() {
        let (port, _) = spawn_server(|_| Some("status: ACTIVE\n".to_string())).await;

        let client = TcpWhoisClient::new("127.0.0.1", Duration::from_secs(u64::MAX)).with_port(port);
        assert_eq!(client.timeout, TcpWhoisClient::MAX_TIMEOUT);

        let tree = client.lookup("example.internal").await.unwrap();
        assert_eq!(tree["127.0.0.1"]["status"], "ACTIVE");
    }

    #[tokio::test]
    async fn test_root_answer_returned_without_referral() {
        let (port, _) = spawn_server(|_| Some("% IANA WHOIS server\nstatus: ACTIVE\n".to_string())).await;

        let tree = client(port).lookup("example.internal").await.unwrap();

        assert_eq!(tree.len(), 1);
        assert_eq!(tree["127.0.0.1"]["status"], "ACTIVE");
    }

    #[tokio::test]
    async fn test_registrar_referral_to_same_server_not_repeated() {
        let (port, queries) = spawn_server(|query| {
            Some(match query {
                "test" => "whois: localhost\n".to_string(),
                _ => "Registrar WHOIS Server: localhost\nRegistrar: Example\n".to_string(),
            })
        })
        .await;

        let tree = client(port).lookup("example.test").await.unwrap();

        assert_eq!(tree.len(), 1);
        assert_eq!(queries.lock().len(), 2);
    }

    #[tokio::test]
    async fn test_registrar_timeout_keeps_registry_answer() {
        let (port, _) = spawn_server(|query| match query {
            "test" => Some("refer: localhost\n".to_string()),
            "example.test" => {
                Some("Registrar: Example\nRegistrar WHOIS Server: 127.0.0.1\n".to_string())
            }
            _ => None,
        })
        .await;

        let client = TcpWhoisClient::new("127.0.0.1", Duration::from_millis(500)).with_port(port);
        let tree = client.lookup("example.test").await.unwrap();

        assert_eq!(tree.keys().collect::<Vec<_>>(), vec!["localhost"]);
    }

    #[tokio::test]
    async fn test_root_timeout_is_error() {
        let (port, _) = spawn_server(|_| None).await;

        let client = TcpWhoisClient::new("127.0.0.1", Duration::from_millis(200)).with_port(port);
        let err = client.lookup("example.test").await.unwrap_err();

        assert!(matches!(err, LookupError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_unreachable_root_is_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let err = client(port).lookup("example.test").await.unwrap_err();
        assert!(matches!(err, LookupError::Unreachable(_)));
    }

    #[tokio::test]
    async fn test_response_capped() {
        let (port, _) = spawn_server(|_| Some(format!("status: {}\n", "x".repeat(10_000)))).await;

        let client = client(port).with_max_response_bytes(16);
        let tree = client.lookup("example.internal").await.unwrap();

        assert_eq!(tree["127.0.0.1"]["status"], "xxxxxxxx");
    }

    #[tokio::test]
    async fn test_query_injection_rejected() {
        let err = client(1).lookup("example.com\r\nother.com").await.unwrap_err();
        assert!(matches!(err, LookupError::InvalidQuery(_)));
    }

    #[test]
    fn test_query_formats() {
        assert_eq!(query_for("whois.verisign-grs.com", "a.com"), "domain a.com");
        assert_eq!(query_for("whois.denic.de", "a.de"), "-T dn,ace a.de");
        assert_eq!(query_for("whois.jprs.jp", "a.jp"), "a.jp/e");
        assert_eq!(query_for("whois.nic.uk", "a.uk"), "a.uk");
    }

    #[test]
    fn test_normalize_server() {
        assert_eq!(normalize_server("whois.markmonitor.com"), "whois.markmonitor.com");
        assert_eq!(normalize_server(" WHOIS://Whois.Example.NET/ "), "whois.example.net");
        assert_eq!(normalize_server("https://rdap.example.org/path"), "rdap.example.org");
    }
}
