//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{
    DnsService, HeadersService, ScanService, SocialService, WhoisService,
};
use crate::config::Config;
use crate::domain::lookups::{DnsResolver, HttpFetcher, WhoisClient};
use crate::infrastructure::rate_limit::ScanLimiters;

#[derive(Clone)]
pub struct AppState {
    pub dns_service: Arc<DnsService>,
    pub whois_service: Arc<WhoisService>,
    pub headers_service: Arc<HeadersService>,
    pub social_service: Arc<SocialService>,
    pub scan_service: Arc<ScanService>,
    pub limiters: Arc<ScanLimiters>,
}

impl AppState {
    /// Wires the services on top of the given lookup implementations.
    ///
    /// The rate limit stores are created here, so each `AppState` starts with
    /// fresh quotas.
    pub fn new(
        resolver: Arc<dyn DnsResolver>,
        whois: Arc<dyn WhoisClient>,
        fetcher: Arc<dyn HttpFetcher>,
        config: &Config,
    ) -> Self {
        let limiters = Arc::new(ScanLimiters::from_config(config));
        Self::with_limiters(resolver, whois, fetcher, limiters, config)
    }

    pub fn with_limiters(
        resolver: Arc<dyn DnsResolver>,
        whois: Arc<dyn WhoisClient>,
        fetcher: Arc<dyn HttpFetcher>,
        limiters: Arc<ScanLimiters>,
        config: &Config,
    ) -> Self {
        let dns_service = Arc::new(DnsService::new(resolver, config.dns_timeout()));
        let whois_service = Arc::new(WhoisService::new(whois, config.whois_timeout()));
        let headers_service = Arc::new(HeadersService::new(
            fetcher.clone(),
            config.headers_timeout(),
        ));
        let social_service = Arc::new(SocialService::new(fetcher, config.social_timeout()));

        let scan_service = Arc::new(ScanService::new(
            dns_service.clone(),
            whois_service.clone(),
            headers_service.clone(),
            social_service.clone(),
            limiters.clone(),
            config.scan_deadline(),
        ));

        Self {
            dns_service,
            whois_service,
            headers_service,
            social_service,
            scan_service,
            limiters,
        }
    }
}
