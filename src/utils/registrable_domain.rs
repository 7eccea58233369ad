//! Public-suffix-aware registrable domain (eTLD+1) resolution.

use std::net::IpAddr;

/// Returns the registrable domain of `hostname`.
///
/// Uses the public suffix list compiled into the `psl` crate, so
/// `a.b.example.co.uk` resolves to `example.co.uk` rather than `co.uk`.
/// Fails open: IP addresses, bare suffixes and anything else the list cannot
/// resolve come back as `hostname` unchanged.
pub fn registrable_domain(hostname: &str) -> String {
    if hostname.starts_with('[') || hostname.parse::<IpAddr>().is_ok() {
        return hostname.to_string();
    }

    let trimmed = hostname.trim_end_matches('.');

    psl::domain_str(trimmed)
        .map(str::to_string)
        .unwrap_or_else(|| hostname.to_string())
}
