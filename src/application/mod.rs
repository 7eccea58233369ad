//! Application layer services implementing scan logic.
//!
//! Services consume the lookup ports from [`crate::domain::lookups`], apply
//! timeouts and degradation rules, and shape the results for HTTP handlers
//! and the CLI.
//!
//! # Available Services
//!
//! - [`services::dns_service::DnsService`] - A/AAAA/MX/TXT/NS collection
//! - [`services::whois_service::WhoisService`] - Registration data and summary
//! - [`services::headers_service::HeadersService`] - Security header checklist
//! - [`services::social_service::SocialService`] - Social links and contact emails
//! - [`services::scan_service::ScanService`] - All four at once

pub mod services;
