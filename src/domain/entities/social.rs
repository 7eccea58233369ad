//! Social/contact scan payload.

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SocialScan {
    pub socials: Vec<String>,
    /// At most [`crate::utils::page_scraper::MAX_EMAILS`] entries.
    pub emails: Vec<String>,
}
