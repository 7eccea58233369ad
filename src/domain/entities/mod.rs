//! Scan data model.

pub mod dns;
pub mod headers;
pub mod report;
pub mod social;
pub mod target;
pub mod whois;

pub use dns::{DnsRecords, DnsScan};
pub use headers::{HeaderCheck, HeaderStatus, HeadersScan};
pub use report::{ScanKind, ScanReport, ScanResult};
pub use social::SocialScan;
pub use target::NormalizedTarget;
pub use whois::{WhoisScan, WhoisSummary, WhoisTree};
