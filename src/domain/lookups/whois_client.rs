//! WHOIS port.

use super::LookupError;
use crate::domain::entities::WhoisTree;
use async_trait::async_trait;

/// Fetches registration data for a registrable domain.
///
/// # Implementations
///
/// - [`crate::infrastructure::whois::TcpWhoisClient`] - RFC 3912 over TCP port 43
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WhoisClient: Send + Sync {
    /// Looks up `domain` and returns the answers keyed by responding server.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] when not even the first server answered.
    /// Failures of later referral hops are tolerated and simply leave those
    /// servers out of the tree.
    async fn lookup(&self, domain: &str) -> Result<WhoisTree, LookupError>;
}
