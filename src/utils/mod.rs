//! Pure helpers shared by the services and handlers.
//!
//! - [`url_normalizer`] - Raw input to absolute URL, validation, hostname extraction
//! - [`registrable_domain`] - eTLD+1 resolution via the public suffix list
//! - [`client_ip`] - Rate-limit client token from request headers
//! - [`page_scraper`] - Social link and email extraction from HTML
//! - [`whois_summary`] - Best-effort headline fields from a raw WHOIS tree

pub mod client_ip;
pub mod page_scraper;
pub mod registrable_domain;
pub mod url_normalizer;
pub mod whois_summary;
