//! Regex-based extraction of social profile links and contact emails from HTML.
//!
//! Best effort only: the body is scanned as text, not parsed as a DOM. Links
//! inside comments or scripts are picked up, links built by JavaScript are
//! not.
//!
//! Two bounds apply. The production fetcher reads at most
//! [`MAX_BODY_BYTES`](crate::infrastructure::http::MAX_BODY_BYTES)
//! of the page, so links past that point are never seen. Emails are further
//! limited to the first [`EMAIL_SCAN_LIMIT_CHARS`] characters.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Domains (and path prefixes) whose links count as social profiles.
pub const SOCIAL_DOMAINS: &[&str] = &[
    "facebook.com",
    "twitter.com",
    "x.com",
    "linkedin.com",
    "instagram.com",
    "github.com",
    "gitlab.com",
    "youtube.com",
    "tiktok.com",
    "discord.gg",
    "discord.com/invite",
    "t.me",
    "telegram.me",
];

/// Number of leading characters of the body scanned for emails.
pub const EMAIL_SCAN_LIMIT_CHARS: usize = 500_000;

/// Maximum number of emails reported.
pub const MAX_EMAILS: usize = 20;

static HREF_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)href=["'](https?://[^"']+)["']"#).unwrap());

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b").unwrap()
});

/// Asset-like suffixes (`logo@2x.png`) that look like emails but are not.
static ASSET_SUFFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(png|jpg|jpeg|gif|svg|webp|css|js)$").unwrap());

/// Collects absolute `href` targets pointing at a known social platform.
///
/// Matching is a plain substring test against [`SOCIAL_DOMAINS`], so
/// `https://example.com/?ref=github.com` also matches. Results are
/// deduplicated and keep first-seen order.
pub fn extract_social_links(html: &str) -> Vec<String> {
    let mut seen = HashSet::new();

    HREF_REGEX
        .captures_iter(html)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .filter(|link| SOCIAL_DOMAINS.iter().any(|domain| link.contains(domain)))
        .filter(|link| seen.insert(*link))
        .map(str::to_string)
        .collect()
}

/// Collects email-like tokens from the first [`EMAIL_SCAN_LIMIT_CHARS`] characters.
///
/// Tokens ending in an image, script or stylesheet extension are dropped.
/// Results are deduplicated, keep first-seen order and are capped at
/// [`MAX_EMAILS`].
pub fn extract_emails(html: &str) -> Vec<String> {
    let mut seen = HashSet::new();

    EMAIL_REGEX
        .find_iter(leading_chars(html, EMAIL_SCAN_LIMIT_CHARS))
        .map(|m| m.as_str())
        .filter(|candidate| !ASSET_SUFFIX_REGEX.is_match(candidate))
        .filter(|candidate| seen.insert(*candidate))
        .take(MAX_EMAILS)
        .map(str::to_string)
        .collect()
}

/// Slices `text` to at most `max_chars` characters on a char boundary.
fn leading_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
