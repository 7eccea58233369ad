//! Scan services for the application layer.

pub mod dns_service;
pub mod headers_service;
pub mod scan_service;
pub mod social_service;
pub mod whois_service;

pub use dns_service::DnsService;
pub use headers_service::HeadersService;
pub use scan_service::ScanService;
pub use social_service::SocialService;
pub use whois_service::WhoisService;
