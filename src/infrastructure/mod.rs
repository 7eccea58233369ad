//! Infrastructure layer for external integrations.
//!
//! This layer implements the lookup ports defined by the domain layer and
//! holds the in-process rate limit store.
//!
//! # Modules
//!
//! - [`dns`] - `hickory-resolver` DNS resolver
//! - [`whois`] - RFC 3912 WHOIS client with referral following
//! - [`http`] - `reqwest` fetcher for header and page scans
//! - [`rate_limit`] - Per-client usage counters

pub mod dns;
pub mod http;
pub mod rate_limit;
pub mod whois;
