//! Domain layer: scan data model and lookup ports.
//!
//! - [`entities`] - Normalized target, per-scan payloads, the aggregated report
//! - [`lookups`] - Traits for the external collaborators (DNS, WHOIS, HTTP)
//!
//! Nothing here performs I/O. Concrete lookups live in
//! [`crate::infrastructure`], scan logic in [`crate::application::services`].

pub mod entities;
pub mod lookups;
