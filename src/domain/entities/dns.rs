//! DNS scan payload.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Records per type. A type whose lookup failed is an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DnsRecords {
    #[serde(rename = "A")]
    pub a: Vec<String>,
    #[serde(rename = "AAAA")]
    pub aaaa: Vec<String>,
    /// Rendered as `"<preference> <exchange>"`.
    #[serde(rename = "MX")]
    pub mx: Vec<String>,
    /// Flattened: one entry per character-string chunk.
    #[serde(rename = "TXT")]
    pub txt: Vec<String>,
    #[serde(rename = "NS")]
    pub ns: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DnsScan {
    pub hostname: String,
    pub timestamp: DateTime<Utc>,
    pub records: DnsRecords,
}
