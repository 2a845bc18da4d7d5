//! Cache Entry Module
//!
//! Defines the per-key record with its hit history and protection flag.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Number of consecutive fresh hits after which an entry is protected.
pub const PROTECTION_THRESHOLD: u64 = 2;

// == Entry Record ==
/// A single cached value plus the access history the eviction policy needs.
#[derive(Debug, Clone)]
pub struct EntryRecord {
    /// The key this record is stored under
    pub key: String,
    /// The stored value
    pub value: String,
    /// Accesses since creation or the last freshness reset
    pub consecutive_hits: u64,
    /// Whether the entry is preferred to survive eviction
    pub protected: bool,
    /// Monotonic time of the most recent access, used for staleness checks
    pub last_access: Instant,
    /// Wall-clock time of the most recent access, used for reporting
    pub last_accessed_at: DateTime<Utc>,
}

impl EntryRecord {
    // == Constructor ==
    /// Creates a fresh, unprotected record with a hit count of one.
    pub fn new(key: String, value: String, now: Instant) -> Self {
        Self {
            key,
            value,
            consecutive_hits: 1,
            protected: false,
            last_access: now,
            last_accessed_at: Utc::now(),
        }
    }

    // == Is Stale ==
    /// Returns true if more than `ttl` has passed since the last access.
    ///
    /// An access exactly `ttl` after the previous one is still fresh.
    pub fn is_stale(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.last_access) > ttl
    }

    // == Record Hit ==
    /// Applies one access to the hit history.
    ///
    /// Returns true if the access found the entry stale and reset its history.
    pub fn record_hit(&mut self, now: Instant, ttl: Duration) -> bool {
        let stale = self.is_stale(now, ttl);
        if stale {
            self.consecutive_hits = 1;
            self.protected = false;
        } else {
            self.consecutive_hits = self.consecutive_hits.saturating_add(1);
            if self.consecutive_hits >= PROTECTION_THRESHOLD {
                self.protected = true;
            }
        }
        self.touch(now);
        stale
    }

    // == Touch ==
    /// Refreshes both access timestamps.
    pub fn touch(&mut self, now: Instant) {
        self.last_access = now;
        self.last_accessed_at = Utc::now();
    }

    /// Copies out the externally visible state.
    pub fn snapshot(&self) -> EntrySnapshot {
        EntrySnapshot {
            key: self.key.clone(),
            consecutive_hits: self.consecutive_hits,
            protected: self.protected,
            last_accessed: self.last_accessed_at,
        }
    }
}

// == Entry Snapshot ==
/// Read-only view of an entry as reported by `status` and `peek`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntrySnapshot {
    pub key: String,
    pub consecutive_hits: u64,
    pub protected: bool,
    pub last_accessed: DateTime<Utc>,
}
