//! Security header scan payload.

use serde::Serialize;
use std::collections::BTreeMap;

/// Classification of one checklist header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderStatus {
    Present,
    Missing,
    /// Present, but discloses information about the stack.
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderCheck {
    /// Human-readable label, e.g. `HSTS (Strict-Transport-Security)`.
    pub header: String,
    pub status: HeaderStatus,
    pub value: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadersScan {
    pub url: String,
    /// URL after redirects.
    pub final_url: String,
    pub status_code: u16,
    pub security_analysis: Vec<HeaderCheck>,
    /// All response headers, lowercase names, repeated values joined with `", "`.
    pub raw_headers: BTreeMap<String, String>,
}
