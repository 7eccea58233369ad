//! Outbound HTTP backed by `reqwest`.

mod reqwest_fetcher;

pub use reqwest_fetcher::{MAX_BODY_BYTES, ReqwestFetcher};
