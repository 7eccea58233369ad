//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//! Every variable is optional; a `.env` file is honoured when present.
//!
//! ## Server
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//!
//! ## Rate limiting
//!
//! - `RATE_LIMIT_WINDOW_SECONDS` - Quota window (default: 60)
//! - `RATE_LIMIT_MAX_CLIENTS` - Distinct clients tracked per scan kind (default: 500)
//! - `SCAN_RATE_LIMIT` - Requests per window for DNS, headers and social (default: 20)
//! - `WHOIS_RATE_LIMIT` - Requests per window for WHOIS (default: 10)
//!
//! ## Lookups
//!
//! - `DNS_TIMEOUT_SECONDS` (default: 5)
//! - `WHOIS_TIMEOUT_SECONDS` (default: 10)
//! - `HEADERS_TIMEOUT_SECONDS` - Per attempt (default: 5)
//! - `SOCIAL_TIMEOUT_SECONDS` (default: 8)
//! - `SCAN_DEADLINE_SECONDS` - Overall bound per slot of a full scan (default: 15)
//! - `WHOIS_SERVER` - Root WHOIS server queried first (default: `whois.iana.org`)
//! - `USER_AGENT` - Sent with outbound HTTP requests

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; ReconSight/1.0; +https://reconsight.vercel.app)";

/// Upper bound for the rate limit window and every timeout.
pub const MAX_DURATION_SECONDS: u64 = 24 * 60 * 60;

pub const DEFAULT_WHOIS_SERVER: &str = "whois.iana.org";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,

    // ── Rate limiting ───────────────────────────────────────────────────────
    pub rate_limit_window_seconds: u64,
    /// Upper bound on tracked clients per store. Beyond it the least recently
    /// seen client is forgotten.
    pub rate_limit_max_clients: usize,
    pub scan_rate_limit: u32,
    pub whois_rate_limit: u32,

    // ── Lookups ─────────────────────────────────────────────────────────────
    pub dns_timeout_seconds: u64,
    pub whois_timeout_seconds: u64,
    pub headers_timeout_seconds: u64,
    pub social_timeout_seconds: u64,
    pub scan_deadline_seconds: u64,
    pub whois_server: String,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            rate_limit_window_seconds: 60,
            rate_limit_max_clients: 500,
            scan_rate_limit: 20,
            whois_rate_limit: 10,
            dns_timeout_seconds: 5,
            whois_timeout_seconds: 10,
            headers_timeout_seconds: 5,
            social_timeout_seconds: 8,
            scan_deadline_seconds: 15,
            whois_server: DEFAULT_WHOIS_SERVER.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Unset variables take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but does not parse.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            listen_addr: env::var("LISTEN").unwrap_or(defaults.listen_addr),
            log_level: env::var("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: env::var("LOG_FORMAT").unwrap_or(defaults.log_format),
            rate_limit_window_seconds: parse_var(
                "RATE_LIMIT_WINDOW_SECONDS",
                defaults.rate_limit_window_seconds,
            )?,
            rate_limit_max_clients: parse_var(
                "RATE_LIMIT_MAX_CLIENTS",
                defaults.rate_limit_max_clients,
            )?,
            scan_rate_limit: parse_var("SCAN_RATE_LIMIT", defaults.scan_rate_limit)?,
            whois_rate_limit: parse_var("WHOIS_RATE_LIMIT", defaults.whois_rate_limit)?,
            dns_timeout_seconds: parse_var("DNS_TIMEOUT_SECONDS", defaults.dns_timeout_seconds)?,
            whois_timeout_seconds: parse_var(
                "WHOIS_TIMEOUT_SECONDS",
                defaults.whois_timeout_seconds,
            )?,
            headers_timeout_seconds: parse_var(
                "HEADERS_TIMEOUT_SECONDS",
                defaults.headers_timeout_seconds,
            )?,
            social_timeout_seconds: parse_var(
                "SOCIAL_TIMEOUT_SECONDS",
                defaults.social_timeout_seconds,
            )?,
            scan_deadline_seconds: parse_var(
                "SCAN_DEADLINE_SECONDS",
                defaults.scan_deadline_seconds,
            )?,
            whois_server: env::var("WHOIS_SERVER").unwrap_or(defaults.whois_server),
            user_agent: env::var("USER_AGENT").unwrap_or(defaults.user_agent),
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - any window, limit, capacity or timeout is zero
    /// - the window or a timeout exceeds one day
    /// - `whois_server` or `user_agent` is empty
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.rate_limit_window_seconds == 0
            || self.rate_limit_window_seconds > MAX_DURATION_SECONDS
        {
            anyhow::bail!(
                "RATE_LIMIT_WINDOW_SECONDS must be between 1 and {}, got {}",
                MAX_DURATION_SECONDS,
                self.rate_limit_window_seconds
            );
        }

        if self.rate_limit_max_clients == 0 || self.rate_limit_max_clients > 1_000_000 {
            anyhow::bail!(
                "RATE_LIMIT_MAX_CLIENTS must be between 1 and 1000000, got {}",
                self.rate_limit_max_clients
            );
        }

        if self.scan_rate_limit == 0 || self.whois_rate_limit == 0 {
            anyhow::bail!("SCAN_RATE_LIMIT and WHOIS_RATE_LIMIT must be at least 1");
        }

        for (name, value) in [
            ("DNS_TIMEOUT_SECONDS", self.dns_timeout_seconds),
            ("WHOIS_TIMEOUT_SECONDS", self.whois_timeout_seconds),
            ("HEADERS_TIMEOUT_SECONDS", self.headers_timeout_seconds),
            ("SOCIAL_TIMEOUT_SECONDS", self.social_timeout_seconds),
            ("SCAN_DEADLINE_SECONDS", self.scan_deadline_seconds),
        ] {
            if value == 0 || value > MAX_DURATION_SECONDS {
                anyhow::bail!(
                    "{} must be between 1 and {}, got {}",
                    name,
                    MAX_DURATION_SECONDS,
                    value
                );
            }
        }

        if self.whois_server.trim().is_empty() {
            anyhow::bail!("WHOIS_SERVER must not be empty");
        }

        if self.user_agent.trim().is_empty() {
            anyhow::bail!("USER_AGENT must not be empty");
        }

        Ok(())
    }

    pub fn dns_timeout(&self) -> Duration {
        Duration::from_secs(self.dns_timeout_seconds)
    }

    pub fn whois_timeout(&self) -> Duration {
        Duration::from_secs(self.whois_timeout_seconds)
    }

    pub fn headers_timeout(&self) -> Duration {
        Duration::from_secs(self.headers_timeout_seconds)
    }

    pub fn social_timeout(&self) -> Duration {
        Duration::from_secs(self.social_timeout_seconds)
    }

    pub fn scan_deadline(&self) -> Duration {
        Duration::from_secs(self.scan_deadline_seconds)
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!(
            "  Rate limits: {}/{}s per scan, {}/{}s WHOIS, {} clients tracked",
            self.scan_rate_limit,
            self.rate_limit_window_seconds,
            self.whois_rate_limit,
            self.rate_limit_window_seconds,
            self.rate_limit_max_clients
        );
        tracing::info!(
            "  Timeouts: dns {}s, whois {}s, headers {}s, social {}s, scan {}s",
            self.dns_timeout_seconds,
            self.whois_timeout_seconds,
            self.headers_timeout_seconds,
            self.social_timeout_seconds,
            self.scan_deadline_seconds
        );
        tracing::info!("  WHOIS root server: {}", self.whois_server);
    }
}

/// Parses `name` when set, otherwise returns `default`.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a number, got '{}'", name, raw)),
        Err(_) => Ok(default),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable fails to parse or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
