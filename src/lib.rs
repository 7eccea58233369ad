//! # ReconSight
//!
//! Passive reconnaissance for a domain: DNS records, WHOIS registration
//! data, HTTP security headers and public contact points, served over a small
//! Axum JSON API.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Scan payloads and lookup port traits
//! - **Application Layer** ([`application`]) - Scan services and the orchestrator
//! - **Infrastructure Layer** ([`infrastructure`]) - DNS, WHOIS and HTTP clients, rate limit store
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Endpoints
//!
//! - `POST /api/scan/dns`, `/api/scan/whois`, `/api/scan/headers`, `/api/scan/social`
//! - `POST /api/scan` - all four at once
//! - `GET /health`
//!
//! Every scan endpoint takes `{ "url": "example.com" }`.
//!
//! ## Quick Start
//!
//! ```bash
//! cargo run
//! curl -X POST localhost:3000/api/scan -H 'content-type: application/json' -d '{"url":"example.com"}'
//!
//! # Or without a server
//! cargo run --bin recon -- scan example.com
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod logging;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        DnsService, HeadersService, ScanService, SocialService, WhoisService,
    };
    pub use crate::domain::entities::{NormalizedTarget, ScanKind, ScanReport, ScanResult};
    pub use crate::domain::lookups::{DnsResolver, HttpFetcher, LookupError, WhoisClient};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
