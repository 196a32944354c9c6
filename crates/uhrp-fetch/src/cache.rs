//! Memo of verified resolutions: content address to the URL that last served
//! bytes matching it.
//!
//! Entries are only ever written after a successful digest check. By default
//! the cache is unbounded and never expires, which suits a session whose
//! distinct addresses are few. Long-lived processes should set a
//! [`CachePolicy`] bound.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;
use uhrp_address::ContentAddress;

/// Bounds on the resolution cache. Both default to none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CachePolicy {
    /// Evict the least recently used entry once this many are stored.
    pub max_entries: Option<NonZeroUsize>,
    /// Treat entries older than this as absent.
    pub ttl:         Option<Duration>,
}

impl CachePolicy {
    pub fn unbounded() -> Self { Self::default() }

    #[must_use]
    pub fn max_entries(mut self, max_entries: NonZeroUsize) -> Self {
        self.max_entries = Some(max_entries);
        self
    }

    #[must_use]
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }
}

#[derive(Debug)]
struct Entry {
    url:       String,
    stored_at: Instant,
    last_used: u64,
}

#[derive(Debug, Default)]
struct State {
    entries: HashMap<String, Entry>,
    clock:   u64,
}

impl State {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }
}

/// Concurrent map from address to verified URL. Last writer wins.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    policy: CachePolicy,
    state:  Mutex<State>,
}

impl ResolutionCache {
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            state: Mutex::new(State::default()),
        }
    }

    pub fn policy(&self) -> CachePolicy { self.policy }

    /// The verified URL for `address`, if present and not expired.
    pub fn get(&self, address: &ContentAddress) -> Option<String> {
        let mut state = self.state.lock();
        let key = address.encoded();

        let expired = match (state.entries.get(key), self.policy.ttl) {
            (None, _) => return None,
            (Some(entry), Some(ttl)) => entry.stored_at.elapsed() >= ttl,
            (Some(_), None) => false,
        };
        if expired {
            state.entries.remove(key);
            return None;
        }

        let now = state.tick();
        let entry = state.entries.get_mut(key)?;
        entry.last_used = now;
        Some(entry.url.clone())
    }

    /// Record `url` as verified for `address`.
    ///
    /// Callers must only pass URLs whose body passed digest verification.
    pub fn insert(&self, address: &ContentAddress, url: impl Into<String>) {
        let mut state = self.state.lock();
        let key = address.encoded();
        let now = state.tick();

        if let Some(limit) = self.policy.max_entries
            && !state.entries.contains_key(key)
            && state.entries.len() >= limit.get()
        {
            let oldest = state
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                state.entries.remove(&oldest);
            }
        }

        state.entries.insert(key.to_string(), Entry {
            url:       url.into(),
            stored_at: Instant::now(),
            last_used: now,
        });
    }

    /// Drop the entry for `address` only if it still points at `url`.
    ///
    /// Returns whether an entry was removed. A concurrent resolution that
    /// stored a different URL in the meantime is left alone.
    pub fn invalidate(&self, address: &ContentAddress, url: &str) -> bool {
        let mut state = self.state.lock();
        let key = address.encoded();
        if state.entries.get(key).is_some_and(|e| e.url == url) {
            state.entries.remove(key);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize { self.state.lock().entries.len() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn clear(&self) { self.state.lock().entries.clear(); }
}
