use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use sanctuary_core::settings::rate_limiting::RateLimitConfig;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitEntry {
    pub count: u32,
    /// Epoch milliseconds at which the window closes.
    pub reset_time: u64,
}

impl RateLimitEntry {
    fn is_expired(&self, now: u64) -> bool {
        now >= self.reset_time
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    /// Epoch milliseconds.
    pub reset_at: u64,
}

impl RateLimitDecision {
    pub fn reset_at_secs(&self) -> u64 {
        self.reset_at.div_ceil(1000)
    }

    pub fn retry_after_secs(&self, now: u64) -> u64 {
        self.reset_at.saturating_sub(now).div_ceil(1000)
    }
}

/// Process-wide fixed-window counters.
///
/// Clones share the same map. Mutation of a single key happens under the
/// map's shard lock, so concurrent requests for one identifier can never push
/// the count past `max_requests`.
#[derive(Debug, Clone)]
pub struct RateLimitStore {
    entries: Arc<DashMap<String, RateLimitEntry>>,
    sweep_probability: f64,
}

impl Default for RateLimitStore {
    fn default() -> Self {
        Self::new(0.01)
    }
}

pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

impl RateLimitStore {
    pub fn new(sweep_probability: f64) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            sweep_probability,
        }
    }

    pub fn check(&self, identifier: &str, config: &RateLimitConfig) -> RateLimitDecision {
        self.check_at(identifier, config, now_millis())
    }

    pub fn check_at(
        &self,
        identifier: &str,
        config: &RateLimitConfig,
        now: u64,
    ) -> RateLimitDecision {
        // Sweep before taking the entry lock; retain() locks every shard.
        if self.sweep_probability > 0.0 && fastrand::f64() < self.sweep_probability {
            self.sweep(now);
        }

        let limit = config.max_requests;

        match self.entries.entry(identifier.to_string()) {
            Entry::Occupied(mut occupied) if !occupied.get().is_expired(now) => {
                let entry = occupied.get_mut();
                if entry.count >= limit {
                    return RateLimitDecision {
                        allowed: false,
                        limit,
                        remaining: 0,
                        reset_at: entry.reset_time,
                    };
                }
                entry.count += 1;
                RateLimitDecision {
                    allowed: true,
                    limit,
                    remaining: limit - entry.count,
                    reset_at: entry.reset_time,
                }
            }
            entry => {
                let fresh = RateLimitEntry {
                    count: 1,
                    reset_time: now + config.window_ms,
                };
                entry.insert(fresh);
                RateLimitDecision {
                    allowed: true,
                    limit,
                    remaining: limit.saturating_sub(1),
                    reset_at: fresh.reset_time,
                }
            }
        }
    }

    /// Drops every entry whose window has closed.
    pub fn sweep(&self, now: u64) {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        let evicted = before.saturating_sub(self.entries.len());
        if evicted > 0 {
            debug!(evicted, "Swept expired rate limit entries");
        }
    }

    pub fn get(&self, identifier: &str) -> Option<RateLimitEntry> {
        self.entries.get(identifier).map(|entry| *entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: u64 = 1_700_000_000_000;

    fn store() -> RateLimitStore {
        RateLimitStore::new(0.0)
    }

    #[test]
    fn test_first_request_opens_window() {
        let store = store();
        let decision = store.check_at("client", &RateLimitConfig::STRICT, START);

        assert!(decision.allowed);
        assert_eq!(decision.limit, 10);
        assert_eq!(decision.remaining, 9);
        assert_eq!(decision.reset_at, START + 60_000);
        assert_eq!(
            store.get("client"),
            Some(RateLimitEntry {
                count: 1,
                reset_time: START + 60_000
            })
        );
    }

    #[test]
    fn test_request_after_limit_is_denied() {
        let store = store();
        let config = RateLimitConfig::STRICT;

        for i in 0..config.max_requests {
            let decision = store.check_at("client", &config, START + u64::from(i));
            assert!(decision.allowed, "request {} should pass", i + 1);
            assert_eq!(decision.remaining, config.max_requests - i - 1);
        }

        let denied = store.check_at("client", &config, START + 500);
        assert!(!denied.allowed);
        assert_eq!(denied.remaining, 0);
        assert_eq!(denied.reset_at, START + 60_000);
        assert_eq!(denied.retry_after_secs(START + 500), 60);

        // Denials do not count.
        assert_eq!(store.get("client").unwrap().count, config.max_requests);
    }

    #[test]
    fn test_window_resets_at_reset_time() {
        let store = store();
        let config = RateLimitConfig::AUTH_STRICT;

        for _ in 0..=config.max_requests {
            store.check_at("client", &config, START);
        }
        assert!(!store.check_at("client", &config, START + 59_999).allowed);

        let decision = store.check_at("client", &config, START + 60_000);
        assert!(decision.allowed);
        assert_eq!(decision.remaining, config.max_requests - 1);
        assert_eq!(decision.reset_at, START + 120_000);
        assert_eq!(store.get("client").unwrap().count, 1);
    }

    #[test]
    fn test_identifiers_are_independent() {
        let store = store();
        let config = RateLimitConfig {
            window_ms: 1_000,
            max_requests: 1,
        };

        assert!(store.check_at("a", &config, START).allowed);
        assert!(!store.check_at("a", &config, START).allowed);
        assert!(store.check_at("b", &config, START).allowed);
    }

    #[test]
    fn test_retry_after_rounds_up() {
        let decision = RateLimitDecision {
            allowed: false,
            limit: 5,
            remaining: 0,
            reset_at: START + 1_001,
        };
        assert_eq!(decision.retry_after_secs(START), 2);
        assert_eq!(decision.reset_at_secs(), 1_700_000_002);
    }

    #[test]
    fn test_sweep_evicts_only_closed_windows() {
        let store = store();
        let short = RateLimitConfig {
            window_ms: 1_000,
            max_requests: 5,
        };
        store.check_at("old", &short, START);
        store.check_at("new", &RateLimitConfig::DEFAULT, START);

        store.sweep(START + 1_000);

        assert!(store.get("old").is_none());
        assert!(store.get("new").is_some());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_certain_sweep_runs_on_check() {
        let store = RateLimitStore::new(1.0);
        let short = RateLimitConfig {
            window_ms: 10,
            max_requests: 5,
        };
        store.check_at("stale", &short, START);
        store.check_at("other", &short, START + 100);

        assert!(store.get("stale").is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clones_share_counters() {
        let store = store();
        let clone = store.clone();
        store.check_at("client", &RateLimitConfig::DEFAULT, START);
        assert_eq!(clone.check_at("client", &RateLimitConfig::DEFAULT, START).remaining, 98);
    }

    #[test]
    fn test_concurrent_requests_never_exceed_limit() {
        let store = store();
        let config = RateLimitConfig {
            window_ms: 60_000,
            max_requests: 50,
        };

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    (0..25)
                        .filter(|_| store.check_at("shared", &config, START).allowed)
                        .count()
                })
            })
            .collect();

        let allowed: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(allowed, 50);
        assert_eq!(store.get("shared").unwrap().count, 50);
    }
}
