//! Per-adapter outcomes and the aggregated scan report.

use super::{DnsScan, HeadersScan, NormalizedTarget, SocialScan, WhoisScan};
use crate::error::AppError;
use serde::Serialize;
use std::fmt;

/// The four independent lookups a scan is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanKind {
    Dns,
    Whois,
    Headers,
    Social,
}

impl ScanKind {
    pub const ALL: [ScanKind; 4] = [
        ScanKind::Dns,
        ScanKind::Whois,
        ScanKind::Headers,
        ScanKind::Social,
    ];

    /// Slot name used in reports and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanKind::Dns => "dns",
            ScanKind::Whois => "whois",
            ScanKind::Headers => "headers",
            ScanKind::Social => "social",
        }
    }

    /// Name used in user-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            ScanKind::Dns => "DNS",
            ScanKind::Whois => "WHOIS",
            ScanKind::Headers => "Headers",
            ScanKind::Social => "Social",
        }
    }
}

impl fmt::Display for ScanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one adapter within a report.
///
/// Serialized as `{"status":"success","data":…}` or
/// `{"status":"failure","error":…}`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ScanResult<T> {
    Success { data: T },
    Failure { error: String },
}

impl<T> ScanResult<T> {
    pub fn success(data: T) -> Self {
        Self::Success { data }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success { data } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error),
        }
    }
}

impl<T> From<Result<T, AppError>> for ScanResult<T> {
    fn from(result: Result<T, AppError>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(err) => Self::failure(err.to_string()),
        }
    }
}

/// All four adapter outcomes for one target.
///
/// Assembled once after every slot has settled and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub target: NormalizedTarget,
    pub dns: ScanResult<DnsScan>,
    pub whois: ScanResult<WhoisScan>,
    pub headers: ScanResult<HeadersScan>,
    pub social: ScanResult<SocialScan>,
}

impl ScanReport {
    /// Number of slots that failed.
    pub fn failure_count(&self) -> usize {
        [
            self.dns.is_success(),
            self.whois.is_success(),
            self.headers.is_success(),
            self.social.is_success(),
        ]
        .iter()
        .filter(|ok| !**ok)
        .count()
    }
}
