//! Per-client fixed-budget rate limiting.
//!
//! - [`RateLimiter`] - In-memory token → usage store with sliding expiry and
//!   bounded capacity
//! - [`ScanLimiter`] / [`ScanLimiters`] - One store and quota per scan kind
//! - [`Clock`] - Time source, swapped for [`ManualClock`] in tests
//!
//! The store lives in process memory. Several replicas behind a load
//! balancer each count independently, so the effective quota is multiplied
//! by the replica count.

mod clock;
mod limiter;
mod scan_limiter;

pub use clock::{Clock, ManualClock, SystemClock};
pub use limiter::{RateLimitStatus, RateLimiter};
pub use scan_limiter::{ScanLimiter, ScanLimiters};
