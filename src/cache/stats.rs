//! Cache Statistics Module
//!
//! Tracks per-store counters for hits, misses, evictions and freshness resets.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of accesses that found the key
    pub hits: u64,
    /// Number of accesses that did not find the key
    pub misses: u64,
    /// Number of entries evicted to make room for an insert
    pub evictions: u64,
    /// Evictions that had to remove a protected entry
    pub forced_evictions: u64,
    /// Hits that found the entry stale and reset its history
    pub freshness_resets: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no accesses have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self, reset: bool) {
        self.hits += 1;
        if reset {
            self.freshness_resets += 1;
        }
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self, forced: bool) {
        self.evictions += 1;
        if forced {
            self.forced_evictions += 1;
        }
    }
}
