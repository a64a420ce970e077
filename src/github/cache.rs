// src/github/cache.rs
// =============================================================================
// Read-through memoization with a fixed time-to-live.
//
// Each fetch operation owns one TtlCache keyed by its arguments. The client
// checks the cache before making a request and stores the value after a
// successful one. Entries older than the TTL are treated as missing and are
// overwritten by the next successful fetch. There is no size limit and no
// locking: the whole program runs on one thread and the client is borrowed
// mutably for every call.
// =============================================================================

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: HashMap<K, (V, Instant)>,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Returns a copy of the value if it was stored less than `ttl` ago.
    pub fn get(&self, key: &K) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.insert_at(key, value, Instant::now());
    }

    fn get_at(&self, key: &K, now: Instant) -> Option<V> {
        let (value, stored_at) = self.entries.get(key)?;
        if now.saturating_duration_since(*stored_at) < self.ttl {
            Some(value.clone())
        } else {
            None
        }
    }

    fn insert_at(&mut self, key: K, value: V, now: Instant) {
        self.entries.insert(key, (value, now));
    }

    /// Drops every entry, fresh or not.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
