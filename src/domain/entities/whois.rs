//! WHOIS scan payload.

use serde::Serialize;
use serde_json::{Map, Value};

/// Raw WHOIS data keyed by the server that answered.
///
/// Each value is that server's response parsed into `field -> value`
/// (repeated fields become arrays, free text lands under `"text"`). The
/// shape is opaque on purpose; see [`crate::utils::whois_summary`] for
/// best-effort field extraction.
pub type WhoisTree = Map<String, Value>;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoisScan {
    pub hostname: String,
    /// Registrable domain that was actually queried.
    pub root_domain: String,
    pub data: WhoisTree,
    pub summary: Option<WhoisSummary>,
}

/// Headline registration fields, guessed from the raw tree. Lossy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoisSummary {
    pub registrar: Option<String>,
    pub updated_date: Option<String>,
    pub creation_date: Option<String>,
    pub expiry_date: Option<String>,
    pub organization: String,
}
