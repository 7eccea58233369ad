//! Errors surfaced by lookup implementations.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("lookup timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// Connection, TLS or transport failure before any answer arrived.
    #[error("unreachable: {0}")]
    Unreachable(String),

    #[error("no records found")]
    NoRecords,

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("lookup failed: {0}")]
    Failed(String),
}
