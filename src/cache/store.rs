//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking,
//! protection-aware eviction and freshness resets.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::cache::{CacheStats, EntryRecord, EntrySnapshot, FreshnessPolicy, LruTracker};

// == Access Outcome ==
/// State returned by a successful `access`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessOutcome {
    pub value: String,
    pub consecutive_hits: u64,
    pub protected: bool,
}

#[derive(Debug, Default)]
struct StoreInner {
    entries: HashMap<String, EntryRecord>,
    lru: LruTracker,
    stats: CacheStats,
}

// == Cache Store ==
/// Bounded key/value store with protected-LRU eviction.
///
/// Every mutating operation holds the write lock for its whole duration, so
/// the staleness check and the hit update inside `access` are one atomic step.
/// The freshness window is read before the store lock is taken; the two locks
/// are never held together.
#[derive(Debug)]
pub struct CacheStore {
    name: String,
    capacity: usize,
    freshness: FreshnessPolicy,
    inner: RwLock<StoreInner>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store. A capacity of zero is raised to one.
    pub fn new(name: impl Into<String>, capacity: usize, freshness: FreshnessPolicy) -> Self {
        Self {
            name: name.into(),
            capacity: capacity.max(1),
            freshness,
            inner: RwLock::new(StoreInner::default()),
        }
    }

    // == Access ==
    /// Looks up `key` and applies one hit to its history.
    ///
    /// Returns `None` on a miss, with no side effects beyond the miss counter.
    pub fn access(&self, key: &str) -> Option<AccessOutcome> {
        self.access_at(key, Instant::now())
    }

    /// `access` with an explicit clock reading.
    pub fn access_at(&self, key: &str, now: Instant) -> Option<AccessOutcome> {
        let ttl = self.freshness.get();
        let mut guard = self.inner.write();
        let inner = &mut *guard;

        let Some(entry) = inner.entries.get_mut(key) else {
            inner.stats.record_miss();
            return None;
        };

        let reset = entry.record_hit(now, ttl);
        let outcome = AccessOutcome {
            value: entry.value.clone(),
            consecutive_hits: entry.consecutive_hits,
            protected: entry.protected,
        };
        inner.lru.touch(key);
        inner.stats.record_hit(reset);

        if reset {
            debug!(cache = %self.name, key, "Stale entry accessed, hit history reset");
        }
        Some(outcome)
    }

    // == Insert ==
    /// Stores a freshly computed value for a key that just missed.
    ///
    /// Evicts one entry first if the store is full. If the key is already
    /// present (another caller inserted it meanwhile) this behaves as `update`.
    pub fn insert(&self, key: String, value: String) {
        self.insert_at(key, value, Instant::now());
    }

    /// `insert` with an explicit clock reading.
    pub fn insert_at(&self, key: String, value: String, now: Instant) {
        let mut guard = self.inner.write();
        let inner = &mut *guard;

        if let Some(entry) = inner.entries.get_mut(&key) {
            debug!(cache = %self.name, key = %key, "Insert of present key applied as update");
            entry.value = value;
            entry.touch(now);
            inner.lru.touch(&key);
            return;
        }

        if inner.entries.len() >= self.capacity {
            self.evict_one(inner);
        }

        inner.lru.touch(&key);
        inner
            .entries
            .insert(key.clone(), EntryRecord::new(key, value, now));
    }

    // == Update ==
    /// Overwrites the value of a present key and marks it most recently used.
    ///
    /// Hit history and protection are left alone. No-op if the key is absent.
    pub fn update(&self, key: &str, value: String) -> bool {
        self.update_at(key, value, Instant::now())
    }

    /// `update` with an explicit clock reading.
    pub fn update_at(&self, key: &str, value: String, now: Instant) -> bool {
        let mut guard = self.inner.write();
        let inner = &mut *guard;

        match inner.entries.get_mut(key) {
            Some(entry) => {
                entry.value = value;
                entry.touch(now);
                inner.lru.touch(key);
                true
            }
            None => false,
        }
    }

    // == Remove ==
    /// Removes a key if present. Returns true if something was removed.
    pub fn remove(&self, key: &str) -> bool {
        let mut guard = self.inner.write();
        let removed = guard.entries.remove(key).is_some();
        guard.lru.remove(key);
        removed
    }

    // == Clear ==
    /// Drops every entry and resets the counters.
    pub fn clear(&self) {
        *self.inner.write() = StoreInner::default();
    }

    // == Status ==
    /// Snapshot of all entries, most recently used first.
    pub fn status(&self) -> Vec<EntrySnapshot> {
        let inner = self.inner.read();
        inner
            .lru
            .iter()
            .filter_map(|key| inner.entries.get(key))
            .map(EntryRecord::snapshot)
            .collect()
    }

    /// Reads an entry's state without counting it as an access.
    pub fn peek(&self, key: &str) -> Option<EntrySnapshot> {
        self.inner.read().entries.get(key).map(EntryRecord::snapshot)
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.read().stats.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn freshness(&self) -> &FreshnessPolicy {
        &self.freshness
    }

    pub fn ttl(&self) -> Duration {
        self.freshness.get()
    }

    // == Evict One ==
    /// Evicts the least recently used unprotected entry, or the least recently
    /// used entry outright when every entry is protected.
    fn evict_one(&self, inner: &mut StoreInner) {
        let StoreInner { entries, lru, stats } = inner;

        let victim = lru
            .oldest_matching(|key| entries.get(key).map_or(true, |entry| !entry.protected))
            .or_else(|| lru.peek_oldest())
            .map(str::to_owned);

        let Some(victim) = victim else {
            return;
        };

        lru.remove(&victim);
        let forced = entries
            .remove(&victim)
            .map_or(false, |entry| entry.protected);
        stats.record_eviction(forced);

        if forced {
            warn!(cache = %self.name, key = %victim, "All entries protected, evicted least recently used");
        } else {
            debug!(cache = %self.name, key = %victim, "Evicted unprotected entry");
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(30);

    fn store(capacity: usize) -> CacheStore {
        CacheStore::new("test", capacity, FreshnessPolicy::new(TTL).unwrap())
    }

    fn keys(store: &CacheStore) -> Vec<String> {
        store.status().into_iter().map(|s| s.key).collect()
    }

    fn insert_all(store: &CacheStore, names: &[&str]) {
        for name in names {
            store.insert(name.to_string(), format!("value {}", name));
        }
    }

    #[test]
    fn test_store_new() {
        let store = store(5);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.capacity(), 5);
        assert_eq!(store.name(), "test");
        assert_eq!(store.ttl(), TTL);
    }

    #[test]
    fn test_zero_capacity_is_raised() {
        let store = store(0);
        store.insert("a".to_string(), "1".to_string());
        assert_eq!(store.capacity(), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_access_miss_has_no_side_effects() {
        let store = store(5);
        insert_all(&store, &["a"]);
        let before = store.status();

        assert!(store.access("missing").is_none());

        assert_eq!(store.status(), before);
        assert_eq!(store.stats().misses, 1);
    }

    #[test]
    fn test_insert_then_access() {
        let store = store(5);
        store.insert("a".to_string(), "value a".to_string());

        let snap = store.peek("a").unwrap();
        assert_eq!(snap.consecutive_hits, 1);
        assert!(!snap.protected);

        let outcome = store.access("a").unwrap();
        assert_eq!(
            outcome,
            AccessOutcome {
                value: "value a".to_string(),
                consecutive_hits: 2,
                protected: true,
            }
        );
    }

    #[test]
    fn test_hit_accumulation() {
        let store = store(5);
        let start = Instant::now();
        store.insert_at("a".to_string(), "v".to_string(), start);

        for n in 2..=6u64 {
            let outcome = store
                .access_at("a", start + Duration::from_secs(n))
                .unwrap();
            assert_eq!(outcome.consecutive_hits, n);
            assert!(outcome.protected);
        }
    }

    #[test]
    fn test_freshness_reset_then_reprotect() {
        let store = store(5);
        let start = Instant::now();
        store.insert_at("a".to_string(), "v".to_string(), start);
        store.access_at("a", start + Duration::from_secs(1)).unwrap();

        let stale_at = start + Duration::from_secs(1) + TTL + Duration::from_millis(1);
        let outcome = store.access_at("a", stale_at).unwrap();
        assert_eq!(outcome.consecutive_hits, 1);
        assert!(!outcome.protected);

        let outcome = store
            .access_at("a", stale_at + Duration::from_secs(1))
            .unwrap();
        assert_eq!(outcome.consecutive_hits, 2);
        assert!(outcome.protected);
        assert_eq!(store.stats().freshness_resets, 1);
    }

    #[test]
    fn test_ttl_change_applies_to_existing_entries() {
        let store = store(5);
        let start = Instant::now();
        store.insert_at("a".to_string(), "v".to_string(), start);

        store.freshness().set(Duration::from_secs(1)).unwrap();
        let outcome = store.access_at("a", start + Duration::from_secs(2)).unwrap();

        assert_eq!(outcome.consecutive_hits, 1);
        assert!(!outcome.protected);
    }

    #[test]
    fn test_access_does_not_change_value() {
        let store = store(5);
        store.insert("a".to_string(), "original".to_string());

        store.access("a");

        assert_eq!(store.access("a").unwrap().value, "original");
    }

    #[test]
    fn test_eviction_scenario_lru_order() {
        let store = store(5);
        insert_all(&store, &["A", "B", "C", "D", "E"]);

        store.insert("F".to_string(), "value F".to_string());

        assert_eq!(keys(&store), vec!["F", "E", "D", "C", "B"]);
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_eviction_skips_protected_entry() {
        let store = store(2);
        insert_all(&store, &["A"]);
        store.access("A");
        store.access("A");
        insert_all(&store, &["B", "C"]);

        assert_eq!(keys(&store), vec!["C", "A"]);
        assert!(store.peek("A").unwrap().protected);
        assert_eq!(store.stats().forced_evictions, 0);
    }

    #[test]
    fn test_eviction_falls_back_to_lru_when_all_protected() {
        let store = store(3);
        insert_all(&store, &["A", "B", "C"]);
        for key in ["A", "B", "C"] {
            store.access(key);
        }
        assert_eq!(keys(&store), vec!["C", "B", "A"]);

        store.insert("D".to_string(), "value D".to_string());

        assert_eq!(keys(&store), vec!["D", "C", "B"]);
        let stats = store.stats();
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.forced_evictions, 1);
    }

    #[test]
    fn test_insert_present_key_acts_as_update() {
        let store = store(2);
        insert_all(&store, &["A", "B"]);
        store.access("A");

        store.insert("B".to_string(), "new".to_string());
        store.insert("A".to_string(), "newer".to_string());

        assert_eq!(store.len(), 2);
        assert_eq!(keys(&store), vec!["A", "B"]);
        let a = store.peek("A").unwrap();
        assert_eq!(a.consecutive_hits, 2);
        assert!(a.protected);
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_update() {
        let store = store(5);
        insert_all(&store, &["A", "B"]);
        store.access("A");
        insert_all(&store, &["C"]);

        assert!(store.update("A", "changed".to_string()));
        assert!(!store.update("missing", "nope".to_string()));

        assert_eq!(keys(&store), vec!["A", "C", "B"]);
        let a = store.peek("A").unwrap();
        assert_eq!(a.consecutive_hits, 2);
        assert!(a.protected);
        assert_eq!(store.access("A").unwrap().value, "changed");
        assert!(store.peek("missing").is_none());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let store = store(5);
        insert_all(&store, &["A", "B"]);

        assert!(store.remove("A"));
        assert!(!store.remove("A"));
        assert!(!store.remove("never"));

        assert_eq!(keys(&store), vec!["B"]);
        assert!(store.access("A").is_none());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let store = store(5);
        insert_all(&store, &["A", "B"]);
        store.access("A");

        store.clear();
        assert!(store.status().is_empty());
        assert_eq!(store.stats(), CacheStats::default());

        store.clear();
        assert!(store.status().is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_recency_after_access_and_insert() {
        let store = store(5);
        insert_all(&store, &["A", "B", "C"]);

        store.access("A");
        assert_eq!(keys(&store)[0], "A");

        store.insert("D".to_string(), "value D".to_string());
        assert_eq!(keys(&store), vec!["D", "A", "C", "B"]);
    }

    #[test]
    fn test_peek_does_not_touch() {
        let store = store(5);
        insert_all(&store, &["A", "B"]);

        store.peek("A");

        assert_eq!(keys(&store), vec!["B", "A"]);
        assert_eq!(store.peek("A").unwrap().consecutive_hits, 1);
        assert_eq!(store.stats().hits, 0);
    }

    #[test]
    fn test_concurrent_access_counts_every_hit() {
        let store = store(5);
        store.insert("hot".to_string(), "v".to_string());

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..250 {
                        store.access("hot").unwrap();
                    }
                });
            }
        });

        assert_eq!(store.peek("hot").unwrap().consecutive_hits, 2001);
        assert_eq!(store.stats().hits, 2000);
    }
}
