//! Token → usage counter store.

use super::clock::{Clock, SystemClock};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Outcome of a single [`RateLimiter::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitStatus {
    pub is_limited: bool,
    pub current_usage: u32,
    pub limit: u32,
    pub remaining: u32,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    usage: u32,
    expires_at: Instant,
    last_access: Instant,
}

/// In-memory usage store keyed by client token.
///
/// Every [`check`](Self::check) counts one unit of usage and refreshes the
/// token's expiry to `now + window` (sliding expiry on write). A client that
/// keeps hammering the endpoint therefore stays limited until it goes quiet
/// for a full window.
///
/// The store holds at most `max_clients` live tokens. Admitting a new token
/// at capacity first drops expired entries, then evicts the least recently
/// used one. An evicted client starts from zero on its next request.
#[derive(Debug)]
pub struct RateLimiter {
    entries: Mutex<HashMap<String, Entry>>,
    window: Duration,
    max_clients: usize,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    /// Longest window honored; larger values are clamped.
    pub const MAX_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);

    pub fn new(window: Duration, max_clients: usize) -> Self {
        Self::with_clock(window, max_clients, Arc::new(SystemClock))
    }

    pub fn with_clock(window: Duration, max_clients: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            window: window.min(Self::MAX_WINDOW),
            max_clients: max_clients.max(1),
            clock,
        }
    }

    /// Records one request for `token` and reports whether it exceeds `limit`.
    ///
    /// The increment and the comparison happen under one lock, so concurrent
    /// requests for the same token never lose an update.
    pub fn check(&self, limit: u32, token: &str) -> RateLimitStatus {
        let now = self.clock.now();
        let expires_at = now + self.window;
        let mut entries = self.entries.lock();

        let live = entries
            .get(token)
            .is_some_and(|entry| entry.expires_at > now);

        if !live && !entries.contains_key(token) && entries.len() >= self.max_clients {
            Self::make_room(&mut entries, now, self.max_clients);
        }

        let entry = entries
            .entry(token.to_string())
            .and_modify(|entry| {
                entry.usage = if live { entry.usage.saturating_add(1) } else { 1 };
                entry.expires_at = expires_at;
                entry.last_access = now;
            })
            .or_insert(Entry {
                usage: 1,
                expires_at,
                last_access: now,
            });

        let status = RateLimitStatus {
            is_limited: entry.usage > limit,
            current_usage: entry.usage,
            limit,
            remaining: limit.saturating_sub(entry.usage),
        };

        if status.is_limited {
            warn!(
                client = %token,
                usage = status.current_usage,
                limit,
                "Rate limit exceeded"
            );
        }

        status
    }

    /// Number of tokens currently held, expired ones included.
    pub fn tracked_clients(&self) -> usize {
        self.entries.lock().len()
    }

    fn make_room(entries: &mut HashMap<String, Entry>, now: Instant, max_clients: usize) {
        entries.retain(|_, entry| entry.expires_at > now);

        if entries.len() < max_clients {
            return;
        }

        let victim = entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_access)
            .map(|(token, _)| token.clone());

        if let Some(victim) = victim {
            debug!(client = %victim, "Evicting least recently used rate limit entry");
            entries.remove(&victim);
        }
    }
}
