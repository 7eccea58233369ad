//! Ports for the external collaborators a scan depends on.
//!
//! Each trait is the seam between scan logic and the network:
//!
//! - [`DnsResolver`] - Per-record-type DNS resolution
//! - [`WhoisClient`] - Registration data for a registrable domain
//! - [`HttpFetcher`] - Single HTTP request against the scan target
//!
//! Production implementations live in [`crate::infrastructure`]. Mock
//! implementations are generated via `mockall` for unit tests.

pub mod dns_resolver;
pub mod error;
pub mod http_fetcher;
pub mod whois_client;

pub use dns_resolver::{DnsResolver, RecordKind};
pub use error::LookupError;
pub use http_fetcher::{FetchMethod, FetchRequest, FetchedResponse, HttpFetcher};
pub use whois_client::WhoisClient;

#[cfg(test)]
pub use dns_resolver::MockDnsResolver;
#[cfg(test)]
pub use http_fetcher::MockHttpFetcher;
#[cfg(test)]
pub use whois_client::MockWhoisClient;
