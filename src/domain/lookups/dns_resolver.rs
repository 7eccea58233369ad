//! DNS resolution port.

use super::LookupError;
use async_trait::async_trait;
use std::fmt;

/// Record types collected by a DNS scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    A,
    Aaaa,
    Mx,
    Txt,
    Ns,
}

impl RecordKind {
    pub const ALL: [RecordKind; 5] = [
        RecordKind::A,
        RecordKind::Aaaa,
        RecordKind::Mx,
        RecordKind::Txt,
        RecordKind::Ns,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::A => "A",
            RecordKind::Aaaa => "AAAA",
            RecordKind::Mx => "MX",
            RecordKind::Txt => "TXT",
            RecordKind::Ns => "NS",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves one record type for a hostname.
///
/// # Implementations
///
/// - [`crate::infrastructure::dns::HickoryDnsResolver`] - hickory-resolver backed
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DnsResolver: Send + Sync {
    /// Returns the records of `kind` for `hostname`, rendered as strings.
    ///
    /// TXT records come back flattened (one entry per character-string),
    /// MX records as `"<preference> <exchange>"`, names without the trailing
    /// root dot.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NoRecords`] when the name has no such records,
    /// [`LookupError::Timeout`] or [`LookupError::Failed`] otherwise.
    async fn resolve(&self, hostname: &str, kind: RecordKind) -> Result<Vec<String>, LookupError>;
}
