//! Request body shared by every scan endpoint.

use serde::Deserialize;
use validator::Validate;

/// `{ "url": "example.com" }`
///
/// `url` may be a bare hostname or a full http(s) URL. It is optional at the
/// serde level so that a missing field reaches validation and produces the
/// usual 400 envelope instead of an extractor rejection.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ScanRequest {
    #[validate(length(min = 1, max = 2048, message = "url must be between 1 and 2048 characters"))]
    pub url: Option<String>,
}
