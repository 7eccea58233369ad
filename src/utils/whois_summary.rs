//! Best-effort extraction of headline fields from a raw WHOIS tree.
//!
//! WHOIS has no common schema: every registry and registrar picks its own
//! field names, and many redact registrant data entirely. This module guesses
//! across the common spellings and gives up quietly. It is lossy by nature
//! and must not be used where correctness matters; the raw tree stays the
//! source of truth.

use crate::domain::entities::{WhoisSummary, WhoisTree};
use serde_json::{Map, Value};

/// Placeholder reported when no registrant organization is published.
pub const REDACTED: &str = "Redacted";

const REGISTRAR_KEYS: &[&str] = &["Registrar", "registrar", "Sponsoring Registrar"];
const UPDATED_KEYS: &[&str] = &["Updated Date", "updatedDate", "Last Updated", "last-update"];
const CREATED_KEYS: &[&str] = &["Creation Date", "creationDate", "Created", "created"];
const EXPIRY_KEYS: &[&str] = &[
    "Registry Expiry Date",
    "registryExpiryDate",
    "Registrar Registration Expiration Date",
    "Expiry Date",
    "expires",
];
const ORGANIZATION_KEYS: &[&str] = &[
    "Registrant Organization",
    "registrantOrganization",
    "Registrant",
    "org",
];

/// Summarizes the first server entry of `tree` that looks like a hostname.
///
/// Returns `None` when no server key contains a dot or the entry is not an
/// object. Individual fields are `None` when none of the known spellings is
/// present; the organization defaults to [`REDACTED`].
pub fn summarize(tree: &WhoisTree) -> Option<WhoisSummary> {
    let record = tree
        .iter()
        .find(|(server, _)| server.contains('.'))
        .and_then(|(_, record)| record.as_object())?;

    Some(WhoisSummary {
        registrar: first_field(record, REGISTRAR_KEYS),
        updated_date: first_field(record, UPDATED_KEYS),
        creation_date: first_field(record, CREATED_KEYS),
        expiry_date: first_field(record, EXPIRY_KEYS),
        organization: first_field(record, ORGANIZATION_KEYS)
            .unwrap_or_else(|| REDACTED.to_string()),
    })
}

/// Returns the first non-empty value among `keys`; arrays yield their first string.
fn first_field(record: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .filter_map(|value| match value {
            Value::String(s) => Some(s.as_str()),
            Value::Array(items) => items.iter().find_map(Value::as_str),
            _ => None,
        })
        .find(|s| !s.is_empty())
        .map(str::to_string)
}
