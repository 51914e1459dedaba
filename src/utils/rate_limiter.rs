// src/utils/rate_limiter.rs
// Fixed-window request counting per client identity.
//
// Not a sliding window: a burst straddling a window boundary can see up to
// 2x the ceiling. Accepted imprecision for abuse-damping.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Counter state for one identity. Replaced, never deleted, once its
/// window expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitEntry {
    pub count: u32,
    pub reset_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed,
    Denied { retry_after_secs: u64 },
}

impl RateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateDecision::Allowed)
    }
}

/// The window logic as a pure function of the clock and the previous
/// entry, independent of where entries are stored.
pub fn decide(
    now: Instant,
    max_requests: u32,
    window: Duration,
    entry: Option<RateLimitEntry>,
) -> (RateLimitEntry, RateDecision) {
    match entry {
        Some(entry) if entry.reset_at > now => {
            if entry.count < max_requests {
                let next = RateLimitEntry {
                    count: entry.count + 1,
                    reset_at: entry.reset_at,
                };
                (next, RateDecision::Allowed)
            } else {
                let remaining = entry.reset_at.saturating_duration_since(now);
                let retry_after_secs = (remaining.as_secs_f64().ceil() as u64).max(1);
                (entry, RateDecision::Denied { retry_after_secs })
            }
        }
        // no entry, or the window elapsed: start a fresh one
        _ => {
            let next = RateLimitEntry {
                count: 1,
                reset_at: now + window,
            };
            (next, RateDecision::Allowed)
        }
    }
}

/// Storage seam for rate-limit entries, so the in-memory map can later be
/// swapped for a shared store without touching the window logic.
pub trait LimitStore: Send + Sync {
    fn get(&self, identity: &str) -> Option<RateLimitEntry>;
    fn set(&self, identity: &str, entry: RateLimitEntry);
}

/// Process-wide in-memory store.
#[derive(Default)]
pub struct InMemoryLimitStore {
    entries: Mutex<HashMap<String, RateLimitEntry>>,
}

impl InMemoryLimitStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LimitStore for InMemoryLimitStore {
    fn get(&self, identity: &str) -> Option<RateLimitEntry> {
        self.entries.lock().get(identity).copied()
    }

    fn set(&self, identity: &str, entry: RateLimitEntry) {
        self.entries.lock().insert(identity.to_string(), entry);
    }
}

pub struct FixedWindowLimiter {
    store: Box<dyn LimitStore>,
    max_requests: u32,
    window: Duration,
    // serializes get-decide-set so two concurrent checks for the same
    // identity cannot both observe count < max
    gate: Mutex<()>,
}

impl FixedWindowLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self::with_store(Box::new(InMemoryLimitStore::new()), max_requests, window)
    }

    pub fn with_store(store: Box<dyn LimitStore>, max_requests: u32, window: Duration) -> Self {
        Self {
            store,
            max_requests,
            window,
            gate: Mutex::new(()),
        }
    }

    pub fn check(&self, identity: &str) -> RateDecision {
        let _gate = self.gate.lock();
        let entry = self.store.get(identity);
        let (next, decision) = decide(Instant::now(), self.max_requests, self.window, entry);
        self.store.set(identity, next);
        decision
    }
}
